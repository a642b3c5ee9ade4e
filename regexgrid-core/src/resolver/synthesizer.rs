// regexgrid-core/src/resolver/synthesizer.rs
//! Turns an instruction into a pattern by asking a `CompletionBackend`.
//!
//! The synthesizer never invents a pattern locally. If the backend is down, the
//! reply cannot be cleaned into something that compiles, or anything else goes
//! wrong, the caller gets a `TransformError::Resolution` and no pattern.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};

use crate::backend::CompletionBackend;
use crate::compiler::is_compilable;
use crate::errors::TransformError;
use crate::pii_log;
use crate::resolver::sanitizer::sanitize;

/// Directive sent as the system message of every completion.
pub const SYSTEM_DIRECTIVE: &str = concat!(
    "You convert natural-language descriptions into exactly one regex pattern. ",
    "Match only the value to be replaced, not any surrounding context. ",
    "For numbers, match the exact literal value only with word boundaries (e.g., 1 -> \\b1\\b). ",
    "Do NOT infer comparisons or ranges for numbers unless explicitly stated. ",
    "Examples: 'change Tom to John' -> match Tom; 'change 1 to 0' -> match \\b1\\b. ",
    "Use word boundaries (\\b) when appropriate to avoid partial matches. ",
    "Output only the regex pattern (no code, no explanations, no slashes, no flags). ",
    "The regex must compile with Rust's regex crate: no lookaround and no backreferences."
);

pub const EMPTY_INSTRUCTION: &str = "Instruction must be a non-empty string";
pub const BACKEND_FAILURE: &str = "LLM processing failed. Please ensure Ollama is running.";

/// Builds the user message for an instruction.
pub fn user_message(instruction: &str) -> String {
    format!("Instruction: {}\nReturn only the regex pattern.", instruction)
}

#[derive(Clone)]
pub struct PatternSynthesizer {
    backend: Arc<dyn CompletionBackend>,
}

impl PatternSynthesizer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Resolves `instruction` into a pattern that is guaranteed to compile.
    pub async fn synthesize(&self, instruction: &str) -> Result<String, TransformError> {
        let text = instruction.trim();
        if text.is_empty() {
            return Err(TransformError::Resolution(EMPTY_INSTRUCTION.to_string()));
        }
        pii_log::log_instruction_debug(module_path!(), text);

        match self.query_backend(text).await {
            Ok(pattern) => {
                info!(
                    "Resolved pattern via {} ({} chars).",
                    self.backend.name(),
                    pattern.chars().count()
                );
                pii_log::log_pattern_debug(module_path!(), &pattern);
                Ok(pattern)
            }
            Err(e) => {
                warn!("Pattern synthesis via {} failed: {:#}", self.backend.name(), e);
                Err(TransformError::Resolution(BACKEND_FAILURE.to_string()))
            }
        }
    }

    async fn query_backend(&self, instruction: &str) -> Result<String> {
        if !self.backend.is_available().await? {
            return Err(anyhow!("backend '{}' reported a non-success status", self.backend.name()));
        }

        let raw = self
            .backend
            .complete(SYSTEM_DIRECTIVE, &user_message(instruction))
            .await?;
        pii_log::log_model_reply_debug(module_path!(), &raw);

        let pattern = sanitize(&raw).ok_or_else(|| anyhow!("model reply held no usable pattern"))?;
        if !is_compilable(&pattern) {
            return Err(anyhow!("sanitized pattern does not compile: {}", pattern));
        }
        debug!("Sanitized model reply into a {}-char pattern.", pattern.len());
        Ok(pattern)
    }
}
