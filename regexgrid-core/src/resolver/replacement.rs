// regexgrid-core/src/resolver/replacement.rs
//! Pulls the replacement literal out of an instruction.
//!
//! Only two phrasings are recognised: `replace with|by X` and `change [word] to X`.
//! Everything else gets `DEFAULT_REPLACEMENT`. This never consults the pattern
//! synthesizer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DEFAULT_REPLACEMENT;
use crate::pii_log;

static REPLACE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)replace\s+(?:with|by)\s+['"]?([^'"]+)['"]?"#)
        .expect("replace clause pattern is valid")
});

static CHANGE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)change\s+(?:\w+\s+)?to\s+['"]?([^'"]+)['"]?"#)
        .expect("change clause pattern is valid")
});

/// Returns the replacement value named by `instruction`, or the sentinel.
pub fn extract_replacement(instruction: &str) -> String {
    let lowered = instruction.to_lowercase();

    // "replace" takes priority; a failed replace clause does not fall through to "change".
    let clause = if lowered.contains("replace") {
        Some(&*REPLACE_CLAUSE)
    } else if lowered.contains("change") {
        Some(&*CHANGE_CLAUSE)
    } else {
        None
    };

    let value = clause
        .and_then(|re| re.captures(instruction))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_string());

    pii_log::log_replacement_debug(module_path!(), &value);
    value
}
