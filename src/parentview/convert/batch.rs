use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use crate::parentview::convert::error::Result;
use crate::parentview::convert::filter;
use crate::parentview::convert::io::{csv_write, discover, excel_read};
use crate::parentview::convert::model::Highlight;
use crate::parentview::convert::report::{self, Console};

/// File name pattern of the Parent View management information workbooks.
pub const INPUT_PATTERN: &str = "Parent_View_Management_Information_as_at_*.xlsx";
/// Sheet holding one row per school.
pub const SCHOOL_SHEET: &str = "School Level Data";
/// Banner rows above the header on the school sheet.
pub const BANNER_ROWS: usize = 1;
/// Most recent workbooks converted per run.
pub const DEFAULT_LIMIT: usize = 5;
/// Name of the output directory created beneath the input directory.
pub const OUTPUT_SUBDIR: &str = "converted-csv";
/// URN whose presence is called out on the console.
pub const WATCHED_URN: i64 = 139703;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: String,
    pub sheet: String,
    pub limit: usize,
    pub watched_urn: i64,
}

impl BatchConfig {
    /// Standard settings for `input_dir`, writing to its `converted-csv`
    /// subdirectory.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let output_dir = input_dir.join(OUTPUT_SUBDIR);
        Self {
            input_dir,
            output_dir,
            pattern: INPUT_PATTERN.to_string(),
            sheet: SCHOOL_SHEET.to_string(),
            limit: DEFAULT_LIMIT,
            watched_urn: WATCHED_URN,
        }
    }
}

/// A workbook that was converted successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows_found: usize,
    pub rows_kept: usize,
    pub highlight: Option<Highlight>,
}

/// Result of converting one selected workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Converted(ConvertedFile),
    Failed { input: PathBuf, message: String },
}

/// What a batch run did.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub discovered: usize,
    pub outcomes: Vec<FileOutcome>,
    pub output_dir: PathBuf,
}

impl BatchSummary {
    pub fn converted(&self) -> impl Iterator<Item = &ConvertedFile> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Converted(file) => Some(file),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn converted_count(&self) -> usize {
        self.converted().count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }
}

/// Discovers, selects and converts the workbooks described by `config`.
///
/// Only discovery problems are returned as errors. A workbook that fails to
/// convert is reported on the console, recorded in the summary, and the
/// batch moves on to the next one.
#[instrument(
    level = "info",
    skip_all,
    fields(input_dir = %config.input_dir.display(), output_dir = %config.output_dir.display())
)]
pub fn run<W: Write>(config: &BatchConfig, console: &mut Console<W>) -> Result<BatchSummary> {
    let discovered = discover::discover_inputs(&config.input_dir, &config.pattern)?;
    let total = discovered.len();
    let selected = discover::select_most_recent(discovered, config.limit)?;
    info!(discovered = total, selected = selected.len(), "selected workbooks");
    console.discovered(total, &selected)?;

    fs::create_dir_all(&config.output_dir)?;

    let mut outcomes = Vec::with_capacity(selected.len());
    for input in selected {
        let outcome = match convert_file(config, &input, console) {
            Ok(converted) => FileOutcome::Converted(converted),
            Err(err) => {
                error!(input = %input.display(), error = %err, "conversion failed");
                let message = err.to_string();
                console.failed(&report::file_name(&input), &message)?;
                FileOutcome::Failed { input, message }
            }
        };
        outcomes.push(outcome);
        console.file_done()?;
    }

    let summary = BatchSummary {
        discovered: total,
        outcomes,
        output_dir: config.output_dir.clone(),
    };
    info!(
        converted = summary.converted_count(),
        failed = summary.failed_count(),
        "batch complete"
    );
    console.finished(summary.converted_count(), &summary.output_dir)?;
    Ok(summary)
}

/// Loads the school sheet of `input`, filters it and writes the CSV artifact.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn convert_file<W: Write>(
    config: &BatchConfig,
    input: &Path,
    console: &mut Console<W>,
) -> Result<ConvertedFile> {
    let name = report::file_name(input);
    console.processing(&name)?;

    let table = excel_read::read_sheet(input, &config.sheet, BANNER_ROWS)?;
    let rows_found = table.len();
    info!(rows_found, "loaded school sheet");
    console.rows_found(rows_found)?;

    let filtered = filter::retain_valid_submissions(table)?;
    let rows_kept = filtered.len();
    info!(rows_kept, "filtered school rows");
    console.rows_kept(rows_kept)?;

    let output = csv_write::csv_path_for(input, &config.output_dir);
    csv_write::write_table(&output, &filtered)?;
    console.saved(&report::file_name(&output))?;

    let highlight = filter::find_urn(&filtered, config.watched_urn);
    if let Some(found) = &highlight {
        info!(urn = found.urn, submissions = %found.submissions, "watched school present");
        console.highlight(&name, found)?;
    }

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output,
        rows_found,
        rows_kept,
        highlight,
    })
}
