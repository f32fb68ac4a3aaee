use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;

use crate::parentview::convert::error::{ConvertError, Result};

/// Header of the unique school reference column.
pub const URN_COLUMN: &str = "URN";
/// Header of the survey response count column.
pub const SUBMISSIONS_COLUMN: &str = "Submissions";
/// Header of the school name column.
pub const SCHOOL_NAME_COLUMN: &str = "School Name";
/// Layout used when writing date and time cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMPTY_CELL: Cell = Cell::Empty;

/// A single spreadsheet value as read from a worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Durations and Excel error values, as calamine displays them.
    Other(String),
}

impl Cell {
    /// Whether the cell counts as missing. Whitespace-only text is missing too.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell. Text is parsed after trimming and booleans
    /// count as `1` and `0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            Cell::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Cell::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Text(value) | Cell::Other(value) => f.write_str(value),
            Cell::Bool(value) => write!(f, "{value}"),
            Cell::DateTime(value) => write!(f, "{}", value.format(DATETIME_FORMAT)),
        }
    }
}

/// One worksheet reduced to a header row and the data rows beneath it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Like [`Table::column_index`] but fails with [`ConvertError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ConvertError::MissingColumn(name.to_string()))
    }

    /// Cell at `row`/`col`; short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// The row reported by the diagnostic check for a watched URN.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub urn: i64,
    pub submissions: String,
    pub school_name: String,
}

/// Makes every header usable as a column key: blank headers become
/// `Unnamed: <index>` and repeats get a `.1`, `.2`, ... suffix.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_repeated_headers_are_renamed() {
        let headers = unique_headers(vec![
            "URN".into(),
            "".into(),
            "Score".into(),
            "Score".into(),
            "Score".into(),
        ]);
        assert_eq!(
            headers,
            vec!["URN", "Unnamed: 1", "Score", "Score.1", "Score.2"]
        );
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(Cell::Float(139703.0).to_string(), "139703");
        assert_eq!(Cell::Float(0.25).to_string(), "0.25");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn dates_render_with_time_of_day() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid date");
        assert_eq!(Cell::DateTime(date).to_string(), "2024-05-01 00:00:00");
    }

    #[test]
    fn booleans_compare_as_numbers() {
        assert_eq!(Cell::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Cell::Bool(false).as_f64(), Some(0.0));
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = Table::new(vec!["URN".into(), "Submissions".into()], vec![vec![Cell::Int(1)]]);
        assert!(table.cell(0, 1).is_empty());
        assert!(table.cell(5, 0).is_empty());
    }
}
