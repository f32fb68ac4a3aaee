use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::parentview::convert::error::{ConvertError, Result};
use crate::parentview::convert::model::{Cell, Table, unique_headers};

/// Reads one worksheet as a [`Table`].
///
/// `skip_rows` counts absolute sheet rows, so a banner above the header is
/// skipped even when calamine trims leading blank rows from the used range.
/// The first row after the skipped ones is the header. Rows with no values
/// at all are dropped.
pub fn read_sheet(path: &Path, sheet: &str, skip_rows: usize) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, sheet)?;

    let start_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let skip = skip_rows.saturating_sub(start_row);
    let mut rows = range.rows().skip(skip);

    let headers = match rows.next() {
        Some(header_row) => unique_headers(header_row.iter().map(header_text).collect()),
        None => return Ok(Table::default()),
    };

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    debug!(
        sheet,
        columns = headers.len(),
        rows = rows.len(),
        "worksheet loaded"
    );
    Ok(Table::new(headers, rows))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ConvertError::MissingSheet {
            sheet: name.to_string(),
        })?;
    let range = range_result.map_err(ConvertError::from)?;
    Ok(range)
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::Int(value) => Cell::Int(*value),
        DataType::Float(value) => Cell::Float(*value),
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::DateTime(_) | DataType::DateTimeIso(_) => cell
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Other(cell.to_string())),
        other => Cell::Other(other.to_string()),
    }
}

fn header_text(cell: &DataType) -> String {
    to_cell(cell).to_string().trim().to_string()
}
