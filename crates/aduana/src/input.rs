//! Narrowing helpers over untyped request payloads.
//!
//! Request bodies and query strings reach this crate as
//! `serde_json::Value`. The helpers here narrow one field at a time —
//! presence, type, then rule — and produce the field-named messages the
//! entity parsers fold into a [`ValidationResult`]. Presence is decided
//! by the key existing in the map, never by truthiness, so an explicit
//! `null` stays distinguishable from a missing key.

use serde_json::{Map, Value};

use librario_common::defaults::MIN_SEARCH_LEN;
use librario_common::types::{Patch, ValidationResult};

use crate::sanitize::sanitize_input;
use crate::validators::{validate_external_id, validate_text_length, validate_url};

pub(crate) type Body = Map<String, Value>;

/// Collects violations across independent field checks.
///
/// Parsers run every field check, capture each outcome, and only then
/// decide between a typed record and the accumulated error list; the
/// list order follows the field order of each parser.
#[derive(Debug, Default)]
pub(crate) struct ErrorList {
    errors: Vec<String>,
}

impl ErrorList {
    pub fn new() -> Self {
        ErrorList::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record the outcome of one field check, keeping the value on
    /// success.
    pub fn capture<T>(&mut self, outcome: Result<T, String>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(message);
                None
            }
        }
    }

    /// Like [`ErrorList::capture`] for checks that report several
    /// violations at once.
    pub fn capture_all<T>(&mut self, outcome: Result<T, Vec<String>>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(messages) => {
                self.errors.extend(messages);
                None
            }
        }
    }

    pub fn into_invalid<T>(self) -> ValidationResult<T> {
        ValidationResult::Invalid(self.errors)
    }
}

/// Narrow a payload to an object map.
pub(crate) fn as_object(payload: &Value) -> Option<&Body> {
    payload.as_object()
}

/// Required free-text field: present, a string, and inside the length
/// bounds after sanitization.
pub(crate) fn require_text(
    body: &Body,
    key: &str,
    min: usize,
    max: usize,
) -> Result<String, String> {
    match body.get(key) {
        None | Some(Value::Null) => Err(format!("{key} is required")),
        Some(Value::String(raw)) => checked_text(raw, key, min, max),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

/// Optional free-text field: absent (or null) is fine, anything present
/// must pass.
pub(crate) fn optional_text(
    body: &Body,
    key: &str,
    min: usize,
    max: usize,
) -> Result<Option<String>, String> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => checked_text(raw, key, min, max).map(Some),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

/// Update-payload free-text field that may be cleared with an explicit
/// null.
pub(crate) fn patch_text(
    body: &Body,
    key: &str,
    min: usize,
    max: usize,
) -> Result<Patch<String>, String> {
    match body.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(Value::String(raw)) => checked_text(raw, key, min, max).map(Patch::Set),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

/// Update-payload free-text field that must keep a value; null is a
/// violation, not a clear.
pub(crate) fn patch_required_text(
    body: &Body,
    key: &str,
    min: usize,
    max: usize,
) -> Result<Patch<String>, String> {
    match body.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Err(format!("{key} cannot be null")),
        Some(Value::String(raw)) => checked_text(raw, key, min, max).map(Patch::Set),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

/// Required field holding a plain, unsanitized string (identifiers,
/// credentials). The rule check belongs to the caller.
pub(crate) fn require_string(body: &Body, key: &str) -> Result<String, String> {
    match body.get(key) {
        None | Some(Value::Null) => Err(format!("{key} is required")),
        Some(Value::String(raw)) => Ok(raw.clone()),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

/// Optional URL field. The stored value is trimmed.
pub(crate) fn optional_url(body: &Body, key: &str) -> Result<Option<String>, String> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if validate_url(raw) => Ok(Some(raw.trim().to_string())),
        Some(_) => Err(format!("{key} must be a valid URL")),
    }
}

/// Update-payload URL field, clearable with null.
pub(crate) fn patch_url(body: &Body, key: &str) -> Result<Patch<String>, String> {
    match body.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(Value::String(raw)) if validate_url(raw) => Ok(Patch::Set(raw.trim().to_string())),
        Some(_) => Err(format!("{key} must be a valid URL")),
    }
}

/// Optional external-id field.
pub(crate) fn optional_external_id(body: &Body, key: &str) -> Result<Option<String>, String> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => match validate_external_id(raw) {
            Ok(()) => Ok(Some(raw.clone())),
            Err(_) => Err(external_id_message(key)),
        },
        Some(_) => Err(external_id_message(key)),
    }
}

/// Update-payload external-id field, clearable with null.
pub(crate) fn patch_external_id(body: &Body, key: &str) -> Result<Patch<String>, String> {
    match body.get(key) {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(Value::String(raw)) => match validate_external_id(raw) {
            Ok(()) => Ok(Patch::Set(raw.clone())),
            Err(_) => Err(external_id_message(key)),
        },
        Some(_) => Err(external_id_message(key)),
    }
}

/// Trimmed free-text search term, dropped when below the minimum
/// length. Filters are advisory, so dropping is silent for the caller.
pub(crate) fn search_term(value: Option<&Value>) -> Option<String> {
    let raw = value.and_then(Value::as_str)?;
    let trimmed = raw.trim();
    if trimmed.chars().count() >= MIN_SEARCH_LEN {
        Some(trimmed.to_string())
    } else {
        if !trimmed.is_empty() {
            tracing::debug!(term = trimmed, "dropping search term below minimum length");
        }
        None
    }
}

fn checked_text(raw: &str, key: &str, min: usize, max: usize) -> Result<String, String> {
    let clean = sanitize_input(raw);
    if validate_text_length(&clean, min, max) {
        Ok(clean)
    } else {
        Err(length_message(key, min, max))
    }
}

fn external_id_message(key: &str) -> String {
    format!("{key} must be 1-100 characters from letters, numbers, underscores, and hyphens")
}

pub(crate) fn length_message(key: &str, min: usize, max: usize) -> String {
    if min == 0 {
        format!("{key} must be at most {max} characters")
    } else {
        format!("{key} must be {min}-{max} characters")
    }
}
