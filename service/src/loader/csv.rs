//! CSV/TSV table reader

use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::debug;

use super::traits::{LoaderResult, TableReader, assemble_table};
use crate::table::PathTable;

/// Options for delimited text tables
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,

    /// Whether the first column is a row key to be dropped
    pub drop_key_column: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            drop_key_column: true,
        }
    }
}

impl CsvOptions {
    /// Options for tab-separated files
    #[must_use]
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

/// Reads path tables from CSV or TSV files
#[derive(Debug, Clone, Default)]
pub struct CsvTableReader {
    options: CsvOptions,
}

impl CsvTableReader {
    /// Create a reader with the given options
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Read a table from in-memory text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid delimited data or has no
    /// path columns.
    pub fn read_str(&self, content: &str) -> LoaderResult<PathTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = record_to_vec(reader.headers()?);
        let rows = reader
            .records()
            .map(|record| record.map(|r| record_to_vec(&r)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(columns = headers.len(), rows = rows.len(), "read delimited table");
        assemble_table(headers, rows, self.options.drop_key_column)
    }
}

impl TableReader for CsvTableReader {
    fn read(&self, path: &Path) -> LoaderResult<PathTable> {
        let content = std::fs::read_to_string(path)?;
        self.read_str(&content)
    }

    fn format_name(&self) -> &'static str {
        if self.options.delimiter == b'\t' {
            "tsv"
        } else {
            "csv"
        }
    }
}

fn record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() -> LoaderResult<()> {
        let content = "id,ECOSYSTEM,ECOSYSTEM CATEGORY\n1, a1 ,b1\n2,a2,b2\n";
        let table = CsvTableReader::default().read_str(content)?;
        assert_eq!(table.width(), 2);
        assert_eq!(table.columns()[0].name(), "ECOSYSTEM");
        assert_eq!(table.row(0), Some(vec!["a1", "b1"]));
        Ok(())
    }

    #[test]
    fn test_read_tsv_keeping_key() -> LoaderResult<()> {
        let reader = CsvTableReader::new(CsvOptions {
            drop_key_column: false,
            ..CsvOptions::tsv()
        });
        let table = reader.read_str("A\tB\nx\ty\n")?;
        assert_eq!(reader.format_name(), "tsv");
        assert_eq!(table.width(), 2);
        Ok(())
    }

    #[test]
    fn test_header_only_yields_empty_table() -> LoaderResult<()> {
        let table = CsvTableReader::default().read_str("id,A,B\n")?;
        assert!(table.is_empty());
        assert!(table.path_columns().is_empty());
        Ok(())
    }
}
