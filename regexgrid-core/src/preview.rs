// regexgrid-core/src/preview.rs
//! The JSON preview returned by a transform.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::headless::TransformOutcome;

/// Before/after view of a transform, truncated to a fixed number of rows.
///
/// Field names are camelCase on the wire (`regexUsed`, `rowsOriginal`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPreview {
    pub regex_used: String,
    pub columns_applied: Vec<String>,
    pub columns: Vec<String>,
    pub rows_original: Vec<Map<String, Value>>,
    pub rows: Vec<Map<String, Value>>,
    /// Row count of the whole table, not of the preview.
    pub total_rows: usize,
}

impl TransformPreview {
    pub fn from_outcome(outcome: &TransformOutcome, preview_rows: usize) -> Self {
        Self {
            regex_used: outcome.pattern.clone(),
            columns_applied: outcome.columns_applied.clone(),
            columns: outcome.output.columns().to_vec(),
            rows_original: outcome.original.head_records(preview_rows),
            rows: outcome.output.head_records(preview_rows),
            total_rows: outcome.output.row_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, Table};
    use serde_json::json;

    fn outcome(rows: usize) -> TransformOutcome {
        let original = Table::new(
            vec!["ID".into(), "Code".into()],
            (0..rows)
                .map(|i| vec![CellValue::Int(i as i64), CellValue::Text(format!("c{}", i))])
                .collect(),
        );
        let output = Table::new(
            vec!["ID".into(), "Code".into()],
            (0..rows)
                .map(|i| vec![CellValue::Int(i as i64), CellValue::Text("X".into())])
                .collect(),
        );
        TransformOutcome {
            pattern: r"c\d+".to_string(),
            replacement: "X".to_string(),
            columns_applied: vec!["Code".to_string()],
            original,
            output,
        }
    }

    #[test]
    fn test_preview_is_truncated_but_total_is_not() {
        let preview = TransformPreview::from_outcome(&outcome(150), 100);
        assert_eq!(preview.rows.len(), 100);
        assert_eq!(preview.rows_original.len(), 100);
        assert_eq!(preview.total_rows, 150);
    }

    #[test]
    fn test_wire_shape() {
        let preview = TransformPreview::from_outcome(&outcome(1), 100);
        let value = serde_json::to_value(&preview).unwrap();
        assert_eq!(
            value,
            json!({
                "regexUsed": "c\\d+",
                "columnsApplied": ["Code"],
                "columns": ["ID", "Code"],
                "rowsOriginal": [{"ID": 0, "Code": "c0"}],
                "rows": [{"ID": 0, "Code": "X"}],
                "totalRows": 1
            })
        );
    }
}
