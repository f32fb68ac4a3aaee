use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::parentview::convert::model::Highlight;

/// Human readable progress for a batch run.
///
/// Lines go to any writer so the binary can use stdout and tests can capture
/// the text. The wording is for people, not for parsing.
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn discovered(&mut self, total: usize, selected: &[PathBuf]) -> io::Result<()> {
        writeln!(self.out, "🔍 Found {total} Excel files:")?;
        for (idx, path) in selected.iter().enumerate() {
            writeln!(self.out, "  {}. {}", idx + 1, file_name(path))?;
        }
        writeln!(
            self.out,
            "\n🚀 Converting top {} most recent files...\n",
            selected.len()
        )
    }

    pub fn processing(&mut self, file: &str) -> io::Result<()> {
        writeln!(self.out, "📁 Processing: {file}")
    }

    pub fn rows_found(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "📊 Found {count} schools")
    }

    pub fn rows_kept(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "✅ {count} schools with valid data")
    }

    pub fn saved(&mut self, file: &str) -> io::Result<()> {
        writeln!(self.out, "💾 Saved: {file}")
    }

    pub fn highlight(&mut self, file: &str, highlight: &Highlight) -> io::Result<()> {
        if highlight.school_name.is_empty() {
            writeln!(self.out, "🎯 FOUND URN {} in {file}!", highlight.urn)?;
        } else {
            writeln!(self.out, "🎯 FOUND {} in {file}!", highlight.school_name)?;
        }
        writeln!(self.out, "   Submissions: {}", highlight.submissions)?;
        writeln!(self.out, "   School Name: {}", highlight.school_name)
    }

    pub fn failed(&mut self, file: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "❌ Error processing {file}: {message}")
    }

    pub fn file_done(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn finished(&mut self, converted: usize, output_dir: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "✅ Conversion complete! {converted} files converted."
        )?;
        writeln!(self.out, "📁 CSV files saved in: {}", output_dir.display())?;
        self.out.flush()
    }
}

/// Final path component for display, falling back to the full path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
