//! Free-text sanitization.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Strip `<script>` blocks and all remaining markup from free text,
/// then trim surrounding whitespace.
///
/// This is best-effort mitigation for stored text, not a full HTML
/// sanitizer; rendering layers must still escape on output. The
/// operation is idempotent: sanitizing already-sanitized text is a
/// no-op.
pub fn sanitize_input(text: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(text, "");
    let without_tags = TAG.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Sanitize a raw payload value. Non-strings sanitize to the empty
/// string.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(text) => sanitize_input(text),
        _ => String::new(),
    }
}
