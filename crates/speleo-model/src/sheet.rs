//! In-memory representation of one workbook sheet.

use serde::{Deserialize, Serialize};

use crate::table::TableKind;
use crate::value::Value;

/// Spreadsheet row number of the first data row (description row, then header).
pub const FIRST_DATA_ROW: usize = 3;

static MISSING: Value = Value::Missing;

/// One data row together with its spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Vec<Value>,
}

/// A sheet: header columns plus row-major cells.
///
/// Cells are aligned with `columns`; short rows are padded with
/// [`Value::Missing`] when pushed. Lookups of an absent column also yield
/// `Missing`, which keeps checks on optional columns total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    kind: TableKind,
    columns: Vec<String>,
    rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn new(kind: TableKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    /// Empty sheet carrying exactly the version-12 columns.
    pub fn with_schema(kind: TableKind) -> Self {
        Self::new(
            kind,
            kind.required_columns()
                .iter()
                .map(|column| (*column).to_string())
                .collect(),
        )
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SheetRow> {
        self.rows.get(index)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Appends a row, padding or truncating its cells to the header width.
    pub fn push_row(&mut self, number: usize, mut cells: Vec<Value>) {
        cells.resize(self.columns.len(), Value::Missing);
        self.rows.push(SheetRow { number, cells });
    }

    /// Appends a row numbered after the previous one.
    pub fn push_next(&mut self, cells: Vec<Value>) {
        let number = self
            .rows
            .last()
            .map_or(FIRST_DATA_ROW, |row| row.number + 1);
        self.push_row(number, cells);
    }

    /// Cell at `(row, column)`; absent rows or columns read as missing.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        match (self.rows.get(row), self.column_index(column)) {
            (Some(row), Some(col)) => &row.cells[col],
            _ => &MISSING,
        }
    }

    /// Overwrites one cell. Returns `false` when the row or column is absent.
    pub fn set_value(&mut self, row: usize, column: &str, value: Value) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row) {
            Some(row) => {
                row.cells[col] = value;
                true
            }
            None => false,
        }
    }

    /// Required columns of this sheet's kind that the header lacks.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        self.kind
            .required_columns()
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamina() -> Sheet {
        let mut sheet = Sheet::new(
            TableKind::Lamina,
            vec!["entity_name".to_string(), "depth_lam".to_string()],
        );
        sheet.push_next(vec![Value::from("A"), Value::from(1.5)]);
        sheet.push_row(7, vec![Value::from("A")]);
        sheet
    }

    #[test]
    fn rows_are_padded_and_numbered() {
        let sheet = lamina();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows()[0].number, FIRST_DATA_ROW);
        assert_eq!(sheet.rows()[1].number, 7);
        assert!(sheet.value(1, "depth_lam").is_missing());
    }

    #[test]
    fn absent_columns_read_missing() {
        let sheet = lamina();
        assert!(sheet.value(0, "lam_age").is_missing());
        assert!(sheet.value(9, "entity_name").is_missing());
        assert_eq!(sheet.value(0, "depth_lam").as_number(), Some(1.5));
    }

    #[test]
    fn reports_missing_schema_columns() {
        let sheet = lamina();
        let missing = sheet.missing_columns();
        assert!(missing.contains(&"lam_age"));
        assert!(!missing.contains(&"depth_lam"));
        assert!(Sheet::with_schema(TableKind::Lamina).missing_columns().is_empty());
    }

    #[test]
    fn set_value_rejects_unknown_column() {
        let mut sheet = lamina();
        assert!(sheet.set_value(0, "depth_lam", Value::from(2.0)));
        assert!(!sheet.set_value(0, "lam_age", Value::from(2.0)));
        assert_eq!(sheet.value(0, "depth_lam").as_number(), Some(2.0));
    }
}
