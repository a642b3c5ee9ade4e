//! errors.rs - Custom error types for the regexgrid-core library.
//!
//! Every failure a transform can hit is one of these variants. The first four are
//! client-input problems and carry a message meant to be shown verbatim; anything
//! else is wrapped in `Unexpected`.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by `regexgrid-core`.
///
/// `#[non_exhaustive]` so new failure classes can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// Missing or empty file/payload, malformed request JSON, unreadable table.
    #[error("{0}")]
    Input(String),

    /// The uploaded file's extension is not one we can parse.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// No valid pattern could be resolved from the instruction.
    #[error("{0}")]
    Resolution(String),

    /// A pattern reached the substitution stage but does not compile.
    #[error("Invalid regex: {0}")]
    PatternCompile(String),

    /// Anything else.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl TransformError {
    /// True for the variants that describe a problem with the caller's input,
    /// as opposed to a fault inside the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TransformError::Unexpected(_))
    }
}

impl From<std::io::Error> for TransformError {
    fn from(err: std::io::Error) -> Self {
        TransformError::Unexpected(err.into())
    }
}
