use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error type covering the different failure cases that can occur while the
/// converter discovers, reads, filters, or writes a workbook.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the input file pattern is not a valid glob.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Raised when the workbook does not contain the requested sheet.
    #[error("missing sheet '{sheet}'")]
    MissingSheet { sheet: String },

    /// Raised when the header row lacks a column the filters depend on.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// Raised when a numeric column holds a value that cannot be compared.
    #[error("invalid number '{value}' in column {column} at data row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// Raised when discovery finds nothing to convert.
    #[error("no files matching '{pattern}' found in {}", dir.display())]
    NoInputFiles { dir: PathBuf, pattern: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
