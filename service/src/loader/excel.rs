//! Spreadsheet table reader (xlsx, xlsm, xls, ods)
//!
//! Reads the first worksheet unless a sheet name is given. The first row is
//! the header row.

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use chrono::Timelike;
use std::path::Path;
use tracing::debug;

use super::traits::{LoaderError, LoaderResult, TableReader, assemble_table};
use crate::table::PathTable;

/// Reads path tables from spreadsheet workbooks
#[derive(Debug, Clone)]
pub struct ExcelTableReader {
    sheet: Option<String>,
    drop_key_column: bool,
}

impl Default for ExcelTableReader {
    fn default() -> Self {
        Self {
            sheet: None,
            drop_key_column: true,
        }
    }
}

impl ExcelTableReader {
    /// Create a reader for the first worksheet, dropping the key column
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the named worksheet instead of the first one
    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Keep or drop the leading row-key column
    #[must_use]
    pub fn with_drop_key_column(mut self, drop: bool) -> Self {
        self.drop_key_column = drop;
        self
    }
}

impl TableReader for ExcelTableReader {
    fn read(&self, path: &Path) -> LoaderResult<PathTable> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let sheet = match &self.sheet {
            Some(name) => sheet_names
                .iter()
                .find(|s| *s == name)
                .cloned()
                .ok_or_else(|| {
                    LoaderError::InvalidFormat(format!(
                        "worksheet '{name}' not found (available: {})",
                        sheet_names.join(", ")
                    ))
                })?,
            None => sheet_names.first().cloned().ok_or_else(|| {
                LoaderError::InvalidFormat("workbook has no worksheets".to_string())
            })?,
        };

        let range = workbook.worksheet_range(&sheet)?;
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());
        let headers = rows.next().ok_or_else(|| {
            LoaderError::InvalidFormat(format!("worksheet '{sheet}' is empty"))
        })?;
        let rows: Vec<Vec<String>> = rows.collect();

        debug!(
            sheet = %sheet,
            columns = headers.len(),
            rows = rows.len(),
            "read worksheet"
        );
        assemble_table(headers, rows, self.drop_key_column)
    }

    fn format_name(&self) -> &'static str {
        "excel"
    }
}

/// Render a cell as text. Whole-number floats lose their fractional part so
/// that numeric codes read the same as they display.
fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.trim().to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_datetime_to_string(dt),
        Data::DateTimeIso(dt) => dt.clone(),
        Data::DurationIso(d) => d.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// ISO 8601 text for a serial date, matching how `DateTimeIso` cells read
fn excel_datetime_to_string(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 => {
            datetime.date().format("%Y-%m-%d").to_string()
        }
        Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTimeType;

    #[test]
    fn test_cell_rendering() {
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::String(" Aquatic ".to_string())), "Aquatic");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_serial_dates_render_as_iso() {
        let date = ExcelDateTime::new(45_292.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_to_string(&Data::DateTime(date)), "2024-01-01");

        let noon = ExcelDateTime::new(45_292.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_to_string(&Data::DateTime(noon)), "2024-01-01T12:00:00");
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = ExcelTableReader::new().read(Path::new("/nonexistent/gold.xlsx"));
        assert!(result.is_err());
    }
}
