//! In-memory path table
//!
//! A `PathTable` is an ordered list of named columns whose values are aligned
//! by row index. Column order defines path positions: column `0` is the first
//! part of every path. The table is immutable once built.

use linkml_core::error::{LinkMLError, Result};

/// A named column of cell values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    values: Vec<String>,
}

impl Column {
    /// Create a column, trimming every value
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into().trim().to_string(),
            values: values.into_iter().map(|v| trim_owned(v.into())).collect(),
        }
    }

    /// Column header as given in the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell values in row order (blank cells are empty strings)
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered, row-aligned table of classification paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl PathTable {
    /// Build a table from columns
    ///
    /// # Errors
    ///
    /// Returns a parse error if the columns do not all have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(LinkMLError::parse_at(
                format!(
                    "column has {} values but the table has {row_count} rows",
                    ragged.len()
                ),
                format!("column '{}'", ragged.name()),
            ));
        }
        Ok(Self { columns, row_count })
    }

    /// Build a table from a header row and data rows
    ///
    /// # Errors
    ///
    /// Returns a parse error if a row does not have one cell per header.
    pub fn from_rows<H, R, S>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(LinkMLError::parse_at(
                    format!("expected {} cells, found {}", headers.len(), row.len()),
                    format!("row {}", row_idx + 1),
                ));
            }
            for (column, value) in cells.iter_mut().zip(row) {
                column.push(value.into());
            }
        }
        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name, values))
            .collect();
        Self::new(columns)
    }

    /// All columns, including those of a table without rows
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns that define path positions.
    ///
    /// A table without rows has no usable path positions.
    pub fn path_columns(&self) -> &[Column] {
        if self.row_count == 0 {
            &[]
        } else {
            &self.columns
        }
    }

    /// Number of path positions
    pub fn width(&self) -> usize {
        self.path_columns().len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        (index < self.row_count).then(|| {
            self.columns
                .iter()
                .map(|c| c.values[index].as_str())
                .collect()
        })
    }

    /// Iterate over rows in table order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count).filter_map(|index| self.row(index))
    }

    /// The path a row spells out: its cells up to (not including) the first blank
    pub fn path(&self, index: usize) -> Option<Vec<&str>> {
        self.row(index)
            .map(|row| row.into_iter().take_while(|v| !is_blank(v)).collect())
    }
}

/// Whether a cell value counts as blank
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_aligns_columns() -> Result<()> {
        let table = PathTable::from_rows(
            ["ECOSYSTEM", "ECOSYSTEM CATEGORY"],
            vec![vec!["a1", "b1"], vec![" a2 ", "b2"]],
        )?;
        assert_eq!(table.width(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[0].values(), &["a1", "a2"]);
        assert_eq!(table.row(1), Some(vec!["a2", "b2"]));
        assert_eq!(table.row(2), None);
        Ok(())
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = PathTable::new(vec![
            Column::new("A", ["x", "y"]),
            Column::new("B", ["z"]),
        ])
        .unwrap_err();
        assert!(matches!(err, LinkMLError::ParseError { .. }));
    }

    #[test]
    fn test_short_row_rejected() {
        let err = PathTable::from_rows(["A", "B"], vec![vec!["x"]]).unwrap_err();
        match err {
            LinkMLError::ParseError { location, .. } => {
                assert_eq!(location.as_deref(), Some("row 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_table_without_rows_has_no_path_columns() -> Result<()> {
        let table = PathTable::from_rows(["A", "B"], Vec::<Vec<String>>::new())?;
        assert_eq!(table.columns().len(), 2);
        assert!(table.path_columns().is_empty());
        assert_eq!(table.width(), 0);
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_path_stops_at_first_blank() -> Result<()> {
        let table = PathTable::from_rows(["A", "B", "C"], vec![vec!["x", "", "z"]])?;
        assert_eq!(table.path(0), Some(vec!["x"]));
        Ok(())
    }
}
