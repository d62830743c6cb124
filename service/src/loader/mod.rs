//! Table loading
//!
//! Readers turn spreadsheet and delimited files into a [`PathTable`].
//! [`load_table`] picks a reader from the file extension.

pub mod csv;
pub mod excel;
pub mod traits;

pub use self::csv::{CsvOptions, CsvTableReader};
pub use excel::ExcelTableReader;
pub use traits::{LoaderError, LoaderResult, TableReader};

use linkml_core::config::TableConfig;
use std::path::Path;
use tracing::info;

use crate::table::PathTable;

/// Pick a reader for `path` based on its extension
///
/// # Errors
///
/// Returns [`LoaderError::InvalidFormat`] for unknown extensions.
pub fn reader_for(path: &Path, config: &TableConfig) -> LoaderResult<Box<dyn TableReader>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let reader: Box<dyn TableReader> = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
            let mut reader = ExcelTableReader::new().with_drop_key_column(config.drop_key_column);
            if let Some(sheet) = &config.sheet {
                reader = reader.with_sheet(sheet);
            }
            Box::new(reader)
        }
        "csv" | "tsv" => {
            let base = if extension == "tsv" {
                CsvOptions::tsv()
            } else {
                CsvOptions::default()
            };
            Box::new(CsvTableReader::new(CsvOptions {
                drop_key_column: config.drop_key_column,
                ..base
            }))
        }
        other => {
            return Err(LoaderError::InvalidFormat(format!(
                "unsupported table format '{other}' for {}",
                path.display()
            )));
        }
    };
    Ok(reader)
}

/// Load the path table stored at `path`
///
/// # Errors
///
/// Returns an error if the format is unsupported or the file cannot be read.
pub fn load_table(path: &Path, config: &TableConfig) -> LoaderResult<PathTable> {
    let reader = reader_for(path, config)?;
    let table = reader.read(path)?;
    info!(
        path = %path.display(),
        format = reader.format_name(),
        columns = table.width(),
        rows = table.row_count(),
        "loaded path table"
    );
    Ok(table)
}

/// Name recorded as a schema's source: the file name, or the whole path when
/// it has none
#[must_use]
pub fn source_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
