use std::path::{Path, PathBuf};

use crate::parentview::convert::error::Result;
use crate::parentview::convert::model::Table;

/// Writes the table as comma separated text: the header line, then one line
/// per row. No index column is added.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;

    let width = table.headers.len();
    for row in 0..table.len() {
        let record = (0..width).map(|col| table.cell(row, col).to_string());
        writer.write_record(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Output path for `input` inside `output_dir`, with the extension swapped
/// for `.csv`.
pub fn csv_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(Path::new)
        .unwrap_or_else(|| Path::new("output"));
    output_dir.join(file_name.with_extension("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_path_replaces_extension() {
        let path = csv_path_for(
            Path::new("raw/Parent_View_Management_Information_as_at_1_May_2024.xlsx"),
            Path::new("raw/converted-csv"),
        );
        assert_eq!(
            path,
            PathBuf::from("raw/converted-csv/Parent_View_Management_Information_as_at_1_May_2024.csv")
        );
    }
}
