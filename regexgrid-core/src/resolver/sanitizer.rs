// regexgrid-core/src/resolver/sanitizer.rs
//! Extracts a bare pattern from a free-form model reply.
//!
//! Models wrap their answer in code fences, `/.../` delimiters, inline backticks
//! or a line of prose. `sanitize` peels those layers off in a fixed order and
//! returns the first candidate that compiles. Every stage is a pure function over
//! strings.

use std::borrow::Cow;

use crate::compiler::is_compilable;

/// Bare language tags a fenced reply may open with.
const LANGUAGE_TAGS: &[&str] = &["regex", "python", "text"];

/// Line prefixes that mark commentary rather than a pattern.
const COMMENT_MARKERS: &[&str] = &["#", "//", "/*"];

/// Letters accepted after a closing `/` delimiter (`/abc/i`).
const DELIMITER_FLAGS: &str = "gimsuxy";

/// Runs the full cleaning pipeline. `None` means nothing usable was found.
pub fn sanitize(raw: &str) -> Option<String> {
    let text = strip_code_fence(raw.trim());
    let text = strip_slash_delimiters(&text);
    let text = text.replace('`', "");
    let text = text.trim();

    if let Some(line) = first_pattern_line(text) {
        return Some(line);
    }

    if !text.is_empty() && is_compilable(text) {
        return Some(text.to_string());
    }
    None
}

/// Removes a surrounding triple-backtick fence and an optional language tag line.
pub fn strip_code_fence(s: &str) -> Cow<'_, str> {
    if !s.starts_with("```") {
        return Cow::Borrowed(s);
    }

    let inner = s.trim_matches('`');
    let mut lines = inner.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    if !rest.is_empty() && LANGUAGE_TAGS.contains(&first.trim()) {
        Cow::Owned(rest.join("\n").trim().to_string())
    } else {
        Cow::Borrowed(inner.trim())
    }
}

/// Unwraps `/pattern/` (optionally followed by flag letters) when the body has no
/// unescaped slash of its own.
pub fn strip_slash_delimiters(s: &str) -> Cow<'_, str> {
    if s.len() < 2 || !s.starts_with('/') {
        return Cow::Borrowed(s);
    }
    let last = match s.rfind('/') {
        Some(idx) if idx > 0 => idx,
        _ => return Cow::Borrowed(s),
    };

    let body = &s[1..last];
    let flags = &s[last + 1..];
    if !flags.chars().all(|c| DELIMITER_FLAGS.contains(c)) || has_unescaped_slash(body) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(body.to_string())
}

fn has_unescaped_slash(body: &str) -> bool {
    let mut escaped = false;
    for c in body.chars() {
        match c {
            '\\' => escaped = !escaped,
            '/' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}

fn is_comment(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// First non-empty, non-comment line that compiles once its own delimiters are removed.
fn first_pattern_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .map(|line| strip_slash_delimiters(line).trim().to_string())
        .find(|candidate| !candidate.is_empty() && is_compilable(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pattern_passes_through() {
        assert_eq!(sanitize(r"\b1\b").as_deref(), Some(r"\b1\b"));
        assert_eq!(sanitize("  Tom \n").as_deref(), Some("Tom"));
    }

    #[test]
    fn test_fenced_block_with_language_tag() {
        let raw = "```regex\n\\d+\n```";
        assert_eq!(sanitize(raw).as_deref(), Some(r"\d+"));
    }

    #[test]
    fn test_fenced_block_without_language_tag() {
        let raw = "```\n[A-Z]{2}\\d{4}\n```";
        assert_eq!(sanitize(raw).as_deref(), Some(r"[A-Z]{2}\d{4}"));
    }

    #[test]
    fn test_single_line_fence_keeps_pattern() {
        assert_eq!(strip_code_fence("```python```"), "python");
        assert_eq!(strip_code_fence("no fence"), "no fence");
    }

    #[test]
    fn test_slash_delimiters_are_removed() {
        assert_eq!(sanitize(r"/\d+/").as_deref(), Some(r"\d+"));
        assert_eq!(sanitize(r"/john/gi").as_deref(), Some("john"));
    }

    #[test]
    fn test_padding_inside_delimiters_is_trimmed() {
        assert_eq!(sanitize("# c\n/ x /").as_deref(), Some("x"));
        assert_eq!(sanitize("/  \\d+ /").as_deref(), Some(r"\d+"));
    }

    #[test]
    fn test_escaped_interior_slash_still_unwraps() {
        assert_eq!(strip_slash_delimiters(r"/a\/b/"), r"a\/b");
    }

    #[test]
    fn test_interior_slash_blocks_unwrapping() {
        assert_eq!(strip_slash_delimiters("/usr/bin"), "/usr/bin");
        assert_eq!(strip_slash_delimiters("/a/b/"), "/a/b/");
        assert_eq!(strip_slash_delimiters("/"), "/");
    }

    #[test]
    fn test_inline_backticks_are_removed() {
        assert_eq!(sanitize(r"`\bTom\b`").as_deref(), Some(r"\bTom\b"));
    }

    #[test]
    fn test_comment_and_invalid_lines_are_skipped() {
        let raw = "# the pattern below matches emails\n(unclosed\n[\\w.]+@[\\w.]+";
        assert_eq!(sanitize(raw).as_deref(), Some(r"[\w.]+@[\w.]+"));
    }

    #[test]
    fn test_delimited_line_inside_prose_is_unwrapped() {
        let raw = "// answer\n/\\d{3}-\\d{4}/";
        assert_eq!(sanitize(raw).as_deref(), Some(r"\d{3}-\d{4}"));
    }

    #[test]
    fn test_nothing_compilable_yields_none() {
        assert_eq!(sanitize(""), None);
        assert_eq!(sanitize("   "), None);
        assert_eq!(sanitize("```\n```"), None);
        assert_eq!(sanitize("(unclosed\n[also bad"), None);
    }

    #[test]
    fn test_sanitize_is_idempotent_on_compilable_input() {
        let inputs = [
            r"\b1\b",
            r"/\d+/",
            "#c\n/abc/",
            r"[\w.+-]+@[\w-]+\.[\w.]+",
            "first\nsecond",
            r"/#x/",
            "# c\n/ x /",
        ];
        for input in inputs {
            assert!(is_compilable(input), "fixture should compile: {input}");
            let once = sanitize(input);
            let twice = once.as_deref().and_then(sanitize);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
