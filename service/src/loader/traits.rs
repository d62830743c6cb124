//! Common traits and types for table readers

use linkml_core::LinkMLError;
use std::path::Path;
use thiserror::Error;

use crate::table::PathTable;

/// Error type for table loading operations
#[derive(Debug, Error)]
pub enum LoaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Spreadsheet error
    #[error("Spreadsheet error: {0}")]
    Excel(#[from] calamine::Error),

    /// Delimited text error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The cells could not be arranged into a table
    #[error(transparent)]
    Table(#[from] LinkMLError),
}

/// Result type for loader operations
pub type LoaderResult<T> = std::result::Result<T, LoaderError>;

impl From<LoaderError> for LinkMLError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::Io(io_err) => LinkMLError::IoError(io_err),
            LoaderError::InvalidFormat(msg) => LinkMLError::parse(msg),
            LoaderError::Excel(e) => LinkMLError::parse(format!("Failed to read workbook: {e}")),
            LoaderError::Csv(e) => LinkMLError::parse(format!("Failed to read delimited file: {e}")),
            LoaderError::Table(e) => e,
        }
    }
}

/// Reads a path table from a file.
///
/// Implementations return the path columns only: the row-key column, when
/// present and configured to be dropped, is removed by the reader.
pub trait TableReader {
    /// Read the table stored at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not contain a
    /// usable table.
    fn read(&self, path: &Path) -> LoaderResult<PathTable>;

    /// Short name of the format handled by this reader
    fn format_name(&self) -> &'static str;
}

/// Turn a header row plus data rows into a [`PathTable`].
///
/// Blank headers become `column_{n}` (1-based). When `drop_key_column` is set,
/// the first column is removed. Rows that are blank in every path column are
/// skipped.
pub(crate) fn assemble_table(
    mut headers: Vec<String>,
    mut rows: Vec<Vec<String>>,
    drop_key_column: bool,
) -> LoaderResult<PathTable> {
    for (idx, header) in headers.iter_mut().enumerate() {
        if header.trim().is_empty() {
            *header = format!("column_{}", idx + 1);
        }
    }

    if drop_key_column {
        if headers.is_empty() {
            return Err(LoaderError::InvalidFormat(
                "table has no columns".to_string(),
            ));
        }
        headers.remove(0);
        for row in &mut rows {
            if !row.is_empty() {
                row.remove(0);
            }
        }
    }

    if headers.is_empty() {
        return Err(LoaderError::InvalidFormat(
            "table has no path columns".to_string(),
        ));
    }

    let width = headers.len();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok(PathTable::from_rows(headers, rows)?)
}
