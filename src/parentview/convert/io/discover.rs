use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{Pattern, glob};
use tracing::{debug, warn};

use crate::parentview::convert::error::{ConvertError, Result};

/// Lists the files in `dir` whose names match `pattern`, in lexical order.
///
/// Fails with [`ConvertError::NoInputFiles`] when nothing matches.
pub fn discover_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = format!("{}/{pattern}", Pattern::escape(&dir.to_string_lossy()));
    let mut files = Vec::new();

    for entry in glob(&full_pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => debug!(path = %path.display(), "skipping non-file match"),
            Err(error) => warn!(path = %error.path().display(), %error, "unreadable match"),
        }
    }

    if files.is_empty() {
        return Err(ConvertError::NoInputFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    debug!(count = files.len(), "discovered input files");
    Ok(files)
}

/// Orders `files` newest first by modification time and keeps at most
/// `limit`. Files with equal timestamps keep their incoming order.
pub fn select_most_recent(files: Vec<PathBuf>, limit: usize) -> Result<Vec<PathBuf>> {
    let mut stamped: Vec<(PathBuf, SystemTime)> = files
        .into_iter()
        .map(|path| -> Result<(PathBuf, SystemTime)> {
            let modified = fs::metadata(&path)?.modified()?;
            Ok((path, modified))
        })
        .collect::<Result<_>>()?;

    stamped.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));
    stamped.truncate(limit);
    Ok(stamped.into_iter().map(|(path, _)| path).collect())
}
