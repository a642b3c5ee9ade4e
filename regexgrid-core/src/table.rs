// regexgrid-core/src/table.rs
//! In-memory table model.
//!
//! A `Table` is a list of column names plus rows of `CellValue`s. Every row has
//! exactly one cell per column; constructors pad or reject to keep it that way.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A single cell. Serialises to the matching JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            // `{:?}` keeps the decimal point on whole floats ("1.0", not "1").
            CellValue::Float(x) => write!(f, "{:?}", x),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Builds a table, padding short rows with `Null` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        &mut self.rows
    }

    /// The first `limit` rows as column-ordered JSON objects.
    pub fn head_records(&self, limit: usize) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), cell_to_json(cell)))
                    .collect()
            })
            .collect()
    }
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Int(i) => Value::from(*i),
        // Non-finite floats have no JSON form.
        CellValue::Float(x) => serde_json::Number::from_f64(*x).map_or(Value::Null, Value::Number),
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Text(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_stringification() {
        assert_eq!(CellValue::Int(1).to_string(), "1");
        assert_eq!(CellValue::Float(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn test_rows_are_normalised_to_width() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![1i64.into()], vec![1i64.into(), 2i64.into(), 3i64.into()]],
        );
        assert_eq!(table.rows()[0], vec![CellValue::Int(1), CellValue::Null]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_head_records_preserve_column_order() {
        let table = Table::new(
            vec!["Zeta".into(), "Alpha".into()],
            vec![
                vec!["z".into(), 1i64.into()],
                vec!["y".into(), CellValue::Null],
                vec!["x".into(), 3i64.into()],
            ],
        );
        let records = table.head_records(2);
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["Zeta", "Alpha"]);
        assert_eq!(Value::Object(records[1].clone()), json!({"Zeta": "y", "Alpha": null}));
    }

    #[test]
    fn test_serialize_cells_untagged() {
        let cells = vec![
            CellValue::Null,
            CellValue::Int(2),
            CellValue::Float(0.5),
            CellValue::Bool(true),
            CellValue::Text("a".into()),
        ];
        assert_eq!(serde_json::to_value(cells).unwrap(), json!([null, 2, 0.5, true, "a"]));
    }
}
