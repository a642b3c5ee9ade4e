// regexgrid-core/src/pii_log.rs
//! Debug-logging helpers for user data.
//!
//! Instructions, model replies and cell values can all carry personal data. They are
//! only written to the debug log verbatim when `REGEXGRID_ALLOW_DEBUG_PII=true`;
//! otherwise a length-only placeholder is logged.

use log::debug;
use once_cell::sync::Lazy;

/// Read once per process.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("REGEXGRID_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn loggable_content(sensitive_content: &str, allow_pii: bool) -> String {
    if allow_pii {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    loggable_content(sensitive_content, *PII_DEBUG_ALLOWED)
}

pub fn log_instruction_debug(module_path: &str, instruction: &str) {
    debug!(
        "{} Resolving instruction: '{}'",
        module_path,
        get_loggable_content(instruction)
    );
}

pub fn log_model_reply_debug(module_path: &str, raw_reply: &str) {
    debug!(
        "{} Raw model reply: '{}'",
        module_path,
        get_loggable_content(raw_reply)
    );
}

pub fn log_pattern_debug(module_path: &str, pattern: &str) {
    debug!(
        "{} Pattern text: '{}'",
        module_path,
        get_loggable_content(pattern)
    );
}

pub fn log_replacement_debug(module_path: &str, replacement: &str) {
    debug!(
        "{} Replacement resolved to '{}'",
        module_path,
        get_loggable_content(replacement)
    );
}
