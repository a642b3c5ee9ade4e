// regexgrid-core/src/backend.rs
//! Defines the `CompletionBackend` trait.
//!
//! The pattern synthesizer never talks to an inference service directly; it goes
//! through this trait. Production code uses the Ollama client in
//! `backends::ollama`, and tests substitute a canned double.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use async_trait::async_trait;

/// A text-completion service reachable over the network.
///
/// Implementations must be cheap to share between requests: the server holds one
/// instance behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    /// Lightweight liveness check.
    ///
    /// Returns `Ok(false)` when the service answered with a non-success status
    /// and `Err` when it could not be reached at all (including timeouts).
    async fn is_available(&self) -> Result<bool>;

    /// Sends one system directive and one user message, returning the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
