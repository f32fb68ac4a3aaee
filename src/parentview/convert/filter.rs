use tracing::debug;

use crate::parentview::convert::error::{ConvertError, Result};
use crate::parentview::convert::model::{
    Cell, Highlight, SCHOOL_NAME_COLUMN, SUBMISSIONS_COLUMN, Table, URN_COLUMN,
};

/// Keeps the rows that carry a URN and a strictly positive submission count.
///
/// Row order and the remaining cells are left untouched. Fails when either
/// column is absent or when a submission count is present but not numeric.
pub fn retain_valid_submissions(table: Table) -> Result<Table> {
    let urn_col = table.require_column(URN_COLUMN)?;
    let submissions_col = table.require_column(SUBMISSIONS_COLUMN)?;

    let Table { headers, rows } = table;
    let total = rows.len();
    let mut kept = Vec::with_capacity(total);

    for (idx, row) in rows.into_iter().enumerate() {
        if cell_at(&row, urn_col).is_empty() {
            continue;
        }

        let submissions = cell_at(&row, submissions_col);
        if submissions.is_empty() {
            continue;
        }

        let count = submissions
            .as_f64()
            .ok_or_else(|| ConvertError::InvalidNumber {
                column: SUBMISSIONS_COLUMN.to_string(),
                row: idx + 1,
                value: submissions.to_string(),
            })?;
        if count > 0.0 {
            kept.push(row);
        }
    }

    debug!(total, kept = kept.len(), "filtered school rows");
    Ok(Table::new(headers, kept))
}

/// Returns the first row whose URN equals `urn`.
pub fn find_urn(table: &Table, urn: i64) -> Option<Highlight> {
    let urn_col = table.column_index(URN_COLUMN)?;
    let submissions_col = table.column_index(SUBMISSIONS_COLUMN);
    let name_col = table.column_index(SCHOOL_NAME_COLUMN);

    let row = (0..table.len()).find(|&row| urn_matches(table.cell(row, urn_col), urn))?;

    let text_at = |col: Option<usize>| {
        col.map(|col| table.cell(row, col).to_string())
            .unwrap_or_default()
    };

    Some(Highlight {
        urn,
        submissions: text_at(submissions_col),
        school_name: text_at(name_col),
    })
}

fn urn_matches(cell: &Cell, urn: i64) -> bool {
    match cell {
        Cell::Int(value) => *value == urn,
        Cell::Float(value) => *value == urn as f64,
        Cell::Text(value) => value.trim().parse::<i64>().is_ok_and(|value| value == urn),
        _ => false,
    }
}

fn cell_at(row: &[Cell], col: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    row.get(col).unwrap_or(&EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<Cell>>) -> Table {
        Table::new(
            vec![
                URN_COLUMN.to_string(),
                SCHOOL_NAME_COLUMN.to_string(),
                SUBMISSIONS_COLUMN.to_string(),
            ],
            rows,
        )
    }

    fn row(urn: Cell, name: &str, submissions: Cell) -> Vec<Cell> {
        vec![urn, Cell::Text(name.to_string()), submissions]
    }

    #[test]
    fn drops_missing_urn_missing_and_non_positive_submissions() {
        let input = table(vec![
            row(Cell::Float(100001.0), "Keep", Cell::Float(12.0)),
            row(Cell::Empty, "No URN", Cell::Float(5.0)),
            row(Cell::Float(100002.0), "No submissions", Cell::Empty),
            row(Cell::Float(100003.0), "Zero", Cell::Float(0.0)),
            row(Cell::Float(100004.0), "Negative", Cell::Int(-3)),
            row(Cell::Int(100005), "Text count", Cell::Text("7".into())),
        ]);

        let filtered = retain_valid_submissions(input).expect("filter succeeds");

        let names: Vec<String> = filtered.rows.iter().map(|row| row[1].to_string()).collect();
        assert_eq!(names, vec!["Keep", "Text count"]);
    }

    #[test]
    fn boolean_submissions_compare_as_one_and_zero() {
        let input = table(vec![
            row(Cell::Int(100001), "Ticked", Cell::Bool(true)),
            row(Cell::Int(100002), "Unticked", Cell::Bool(false)),
        ]);

        let filtered = retain_valid_submissions(input).expect("filter succeeds");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0][1].to_string(), "Ticked");
    }

    #[test]
    fn short_rows_are_treated_as_missing_values() {
        let input = table(vec![vec![Cell::Int(100001)]]);
        let filtered = retain_valid_submissions(input).expect("filter succeeds");
        assert!(filtered.is_empty());
    }

    #[test]
    fn non_numeric_submissions_fail_the_table() {
        let input = table(vec![row(Cell::Int(1), "Bad", Cell::Text("lots".into()))]);
        let error = retain_valid_submissions(input).expect_err("non-numeric count rejected");
        assert!(matches!(error, ConvertError::InvalidNumber { row: 1, .. }));
    }

    #[test]
    fn missing_submissions_column_is_reported() {
        let input = Table::new(vec![URN_COLUMN.to_string()], vec![vec![Cell::Int(1)]]);
        let error = retain_valid_submissions(input).expect_err("column required");
        assert!(matches!(error, ConvertError::MissingColumn(ref name) if name == SUBMISSIONS_COLUMN));
    }

    #[test]
    fn find_urn_reports_first_match() {
        let input = table(vec![
            row(Cell::Float(139703.0), "Harris Academy Chobham", Cell::Float(42.0)),
            row(Cell::Text("139703".into()), "Duplicate", Cell::Float(1.0)),
        ]);

        let highlight = find_urn(&input, 139703).expect("urn present");
        assert_eq!(highlight.school_name, "Harris Academy Chobham");
        assert_eq!(highlight.submissions, "42");
        assert!(find_urn(&input, 1).is_none());
    }
}
