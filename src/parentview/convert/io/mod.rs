pub mod csv_write;
pub mod discover;
pub mod excel_read;
