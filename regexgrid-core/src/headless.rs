// regexgrid-core/src/headless.rs
//! `headless.rs`
//! One-shot transform: instruction in, transformed table out.
//!
//! Used by both the HTTP handlers and the `apply` command, so the two front ends
//! cannot drift apart. Nothing here touches the network directly; the pattern
//! comes from whatever `PatternSynthesizer` the caller hands in.

use log::info;
use serde::Deserialize;

use crate::columns::select_columns;
use crate::engine::SubstitutionEngine;
use crate::errors::TransformError;
use crate::resolver::{extract_replacement, PatternSynthesizer};
use crate::table::Table;

/// The JSON `payload` of a transform request. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransformRequest {
    pub instruction: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl TransformRequest {
    pub fn new(instruction: impl Into<String>, columns: Option<Vec<String>>) -> Self {
        Self {
            instruction: instruction.into(),
            columns,
        }
    }

    /// Parses a request payload. Malformed JSON is an `Input` error.
    pub fn from_json(payload: &str) -> Result<Self, TransformError> {
        serde_json::from_str(payload)
            .map_err(|e| TransformError::Input(format!("Invalid payload: {}", e)))
    }
}

/// Everything a front end needs to answer a transform.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub pattern: String,
    pub replacement: String,
    pub columns_applied: Vec<String>,
    pub original: Table,
    pub output: Table,
}

/// Runs the full transform against an already-parsed table.
///
/// The table is consumed and kept as `original` for the "before" preview. On any
/// error no table is returned at all.
pub async fn run_transform(
    synthesizer: &PatternSynthesizer,
    table: Table,
    request: &TransformRequest,
) -> Result<TransformOutcome, TransformError> {
    let pattern = synthesizer.synthesize(&request.instruction).await?;
    let replacement = extract_replacement(&request.instruction);
    let columns_applied = select_columns(request.columns.as_deref(), table.columns());

    let engine = SubstitutionEngine::new(&pattern)?;
    let output = engine.apply(&table, &replacement, &columns_applied);
    info!(
        "Transform applied to {} column(s) across {} row(s).",
        columns_applied.len(),
        output.row_count()
    );

    Ok(TransformOutcome {
        pattern,
        replacement,
        columns_applied,
        original: table,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CompletionBackend;
    use crate::table::CellValue;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedReply(&'static str);

    #[async_trait]
    impl CompletionBackend for FixedReply {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn is_available(&self) -> Result<bool> {
            Ok(true)
        }
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn synthesizer(reply: &'static str) -> PatternSynthesizer {
        PatternSynthesizer::new(Arc::new(FixedReply(reply)))
    }

    fn people() -> Table {
        Table::new(
            vec!["ID".into(), "Name".into(), "Count".into()],
            vec![
                vec![1i64.into(), "Tom".into(), 1i64.into()],
                vec![2i64.into(), "tommy".into(), 10i64.into()],
            ],
        )
    }

    #[test]
    fn test_request_parsing() {
        let req = TransformRequest::from_json(r#"{"instruction":"find emails","replacement":"x"}"#)
            .unwrap();
        assert_eq!(req, TransformRequest::new("find emails", None));

        let req = TransformRequest::from_json(r#"{"instruction":"a","columns":["Name"]}"#).unwrap();
        assert_eq!(req.columns, Some(vec!["Name".to_string()]));
    }

    #[test]
    fn test_malformed_payload_is_input_error() {
        let err = TransformRequest::from_json(r#"{"columns":[]}"#).unwrap_err();
        assert!(matches!(err, TransformError::Input(_)));
        assert!(err.to_string().starts_with("Invalid payload: "));

        assert!(TransformRequest::from_json("not json").is_err());
    }

    #[tokio::test]
    async fn test_change_instruction_end_to_end() {
        let request = TransformRequest::new("change Tom to John", None);
        let outcome = run_transform(&synthesizer(r"\bTom\b"), people(), &request)
            .await
            .unwrap();

        assert_eq!(outcome.pattern, r"\bTom\b");
        assert_eq!(outcome.replacement, "John");
        assert_eq!(outcome.columns_applied, ["Name", "Count"]);
        assert_eq!(outcome.output.cell(0, "Name"), Some(&CellValue::Text("John".into())));
        assert_eq!(outcome.output.cell(1, "Name"), Some(&CellValue::Text("tommy".into())));
        assert_eq!(outcome.output.cell(0, "ID"), Some(&CellValue::Int(1)));
        assert_eq!(outcome.original, people());
    }

    #[tokio::test]
    async fn test_explicit_columns_limit_the_transform() {
        let request = TransformRequest::new("change 1 to 0", Some(vec!["Count".into(), "Nope".into()]));
        let outcome = run_transform(&synthesizer(r"\b1\b"), people(), &request)
            .await
            .unwrap();

        assert_eq!(outcome.columns_applied, ["Count"]);
        assert_eq!(outcome.output.cell(0, "Count"), Some(&CellValue::Text("0".into())));
        assert_eq!(outcome.output.cell(1, "Count"), Some(&CellValue::Text("10".into())));
    }

    #[tokio::test]
    async fn test_empty_instruction_is_a_resolution_error() {
        let request = TransformRequest::new("", None);
        let err = run_transform(&synthesizer("x"), people(), &request).await.unwrap_err();
        assert!(matches!(err, TransformError::Resolution(_)));
    }
}
