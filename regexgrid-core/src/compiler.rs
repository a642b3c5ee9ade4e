//! compiler.rs - Compiles pattern strings into `Regex` values.
//!
//! Two entry points share the same limits: `compile_pattern` builds the
//! case-insensitive matcher used by the substitution engine, and `is_compilable`
//! is the cheap yes/no check the sanitizer and synthesizer use to vet model output.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::MAX_PATTERN_LENGTH;
use crate::errors::TransformError;

/// Size limit for a compiled program.
const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

fn builder(pattern: &str) -> RegexBuilder {
    let mut builder = RegexBuilder::new(pattern);
    builder.size_limit(COMPILED_SIZE_LIMIT);
    builder
}

/// Compiles `pattern` for substitution: case-insensitive, length- and size-limited.
pub fn compile_pattern(pattern: &str) -> Result<Regex, TransformError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(TransformError::PatternCompile(format!(
            "pattern length ({}) exceeds maximum allowed ({})",
            pattern.len(),
            MAX_PATTERN_LENGTH
        )));
    }

    let regex = builder(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| TransformError::PatternCompile(e.to_string()))?;

    debug!("Pattern compiled successfully ({} chars).", pattern.len());
    Ok(regex)
}

/// Whether `pattern` would be accepted by `compile_pattern`.
pub fn is_compilable(pattern: &str) -> bool {
    pattern.len() <= MAX_PATTERN_LENGTH && builder(pattern).build().is_ok()
}
