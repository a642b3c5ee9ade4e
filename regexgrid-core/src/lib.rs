// regexgrid-core/src/lib.rs
//! # regexgrid Core Library
//!
//! `regexgrid-core` turns a natural-language instruction ("find email addresses",
//! "change Tom to John") into a regex substitution and applies it to the columns of
//! a table. It holds no server or terminal code; the `regexgrid` binary wraps it in
//! an HTTP API and a CLI.
//!
//! ## Modules
//!
//! * `backend` / `backends`: the `CompletionBackend` trait and its Ollama client.
//! * `resolver`: pattern synthesis, model-output sanitizing and replacement extraction.
//! * `compiler`: pattern compilation with length and size limits.
//! * `columns`: chooses which columns a transform touches.
//! * `engine`: the `SubstitutionEngine`.
//! * `table` / `tabular`: the in-memory table and CSV/XLS/XLSX I/O.
//! * `preview`: the JSON preview payload.
//! * `headless`: the one-shot transform used by every front end.
//! * `config`, `errors`, `pii_log`: ambient plumbing.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use regexgrid_core::{
//!     read_table, run_transform, CompletionBackend, PatternSynthesizer, TransformPreview,
//!     TransformRequest,
//! };
//!
//! // Stands in for a running Ollama server.
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionBackend for Canned {
//!     fn name(&self) -> &str { "canned" }
//!     async fn is_available(&self) -> Result<bool> { Ok(true) }
//!     async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
//!         Ok(r"[\w.]+@[\w.]+\.\w+".to_string())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let table = read_table(b"ID,Email\n1,john@example.com\n", "people.csv")?;
//!     let synthesizer = PatternSynthesizer::new(Arc::new(Canned));
//!     let request = TransformRequest::new("find email addresses", None);
//!
//!     let outcome = run_transform(&synthesizer, table, &request).await?;
//!     let preview = TransformPreview::from_outcome(&outcome, 100);
//!     assert_eq!(preview.rows[0]["Email"], "REDACTED");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Public operations return [`TransformError`]. Its first four variants describe bad
//! input and carry a message fit for the caller; `Unexpected` wraps everything else.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod backend;
pub mod backends;
pub mod columns;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod pii_log;
pub mod preview;
pub mod resolver;
pub mod table;
pub mod tabular;

/// Configuration types and the constants shared across the pipeline.
pub use config::{
    BackendConfig, ServerConfig, ServiceConfig, DEFAULT_PREVIEW_ROWS, DEFAULT_REPLACEMENT,
    MAX_PATTERN_LENGTH,
};

pub use errors::TransformError;

/// The inference seam and its production implementation.
pub use backend::CompletionBackend;
pub use backends::ollama::OllamaBackend;

pub use resolver::{extract_replacement, sanitize, PatternSynthesizer};

pub use columns::select_columns;
pub use compiler::compile_pattern;
pub use engine::{apply_substitution, SubstitutionEngine};

/// Table model and file I/O.
pub use table::{CellValue, Table};
pub use tabular::{read_table, read_table_from_path, write_table, OutputFormat, TableFormat};

/// One-shot transform and its result payload.
pub use headless::{run_transform, TransformOutcome, TransformRequest};
pub use preview::TransformPreview;
