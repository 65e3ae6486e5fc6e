//! External author payload mapping.
//!
//! Third-party book/author APIs disagree on field names, so each
//! logical field resolves through a fixed alias chain before mapping
//! into the internal create shape. External data is auxiliary and never
//! authoritative: unusable optional values are dropped rather than
//! reported, and the record only fails when no name can be derived.

use serde_json::Value;

use librario_common::types::ValidationResult;

use crate::input::{as_object, Body};
use crate::sanitize::sanitize_input;
use crate::validators::{validate_external_id, validate_url};

use super::parser::CreateAutor;

const BIOGRAFIA_ALIASES: [&str; 3] = ["biografia", "bio", "description"];
const FOTO_ALIASES: [&str; 3] = ["foto", "photo", "image"];
const MAX_BIOGRAFIA: usize = 10_000;

/// Map an external author payload into the internal create shape.
pub fn parse_external_autor_data(payload: &Value) -> ValidationResult<CreateAutor> {
    let Some(payload) = as_object(payload) else {
        return ValidationResult::fail("external author payload must be an object");
    };

    let name = resolve_name(payload)
        .filter(|(nombre, apellido)| !nombre.is_empty() && !apellido.is_empty());
    let Some((nombre, apellido)) = name else {
        return ValidationResult::fail("external author payload has no usable name");
    };

    let biografia = resolve_alias(payload, &BIOGRAFIA_ALIASES)
        .map(sanitize_input)
        .filter(|biografia| !biografia.is_empty())
        .map(truncate_biografia);

    let foto = resolve_alias(payload, &FOTO_ALIASES).and_then(|raw| {
        if validate_url(raw) {
            Some(raw.to_string())
        } else {
            tracing::debug!("dropping external photo with malformed url");
            None
        }
    });

    ValidationResult::Valid(CreateAutor {
        nombre,
        apellido,
        biografia,
        foto,
        google_books_id: external_id(payload, "googleBooksId"),
        open_library_key: external_id(payload, "openLibraryKey"),
    })
}

/// Prefer discrete name fields; otherwise split a single full-name
/// string.
fn resolve_name(payload: &Body) -> Option<(String, String)> {
    let nombre = resolve_alias(payload, &["nombre", "firstName"]);
    let apellido = resolve_alias(payload, &["apellido", "lastName"]);
    if let (Some(nombre), Some(apellido)) = (nombre, apellido) {
        return Some((sanitize_input(nombre), sanitize_input(apellido)));
    }

    let full = sanitize_input(resolve_alias(payload, &["name", "fullName"])?);
    split_full_name(&full)
}

fn split_full_name(full: &str) -> Option<(String, String)> {
    let mut tokens = full.split_whitespace();
    let first = tokens.next()?.to_string();
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        // a single-token name has no separable surname; downstream
        // consumers expect the token in both halves
        Some((first.clone(), first))
    } else {
        Some((first, rest.join(" ")))
    }
}

/// First alias whose value is a non-empty string, trimmed.
fn resolve_alias<'a>(payload: &'a Body, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|key| {
        payload
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    })
}

fn truncate_biografia(biografia: String) -> String {
    if biografia.chars().count() > MAX_BIOGRAFIA {
        tracing::warn!("truncating external biography to {MAX_BIOGRAFIA} characters");
        biografia.chars().take(MAX_BIOGRAFIA).collect()
    } else {
        biografia
    }
}

fn external_id(payload: &Body, key: &str) -> Option<String> {
    let raw = payload.get(key).and_then(Value::as_str)?;
    match validate_external_id(raw) {
        Ok(()) => Some(raw.to_string()),
        Err(_) => {
            tracing::debug!(key, "dropping malformed external id");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_name_splits_first_token_from_rest() {
        let result = parse_external_autor_data(&json!({
            "name": "Jorge Luis Borges Acevedo"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Jorge");
        assert_eq!(data.apellido, "Luis Borges Acevedo");
    }

    #[test]
    fn test_single_token_name_fills_both_halves() {
        let result = parse_external_autor_data(&json!({ "name": "Colette" }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Colette");
        assert_eq!(data.apellido, "Colette");
    }

    #[test]
    fn test_discrete_name_fields_win_over_full_name() {
        let result = parse_external_autor_data(&json!({
            "nombre": "Gabriel",
            "apellido": "García Márquez",
            "name": "G. García"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Gabriel");
        assert_eq!(data.apellido, "García Márquez");
    }

    #[test]
    fn test_biografia_alias_chain() {
        let from_bio = parse_external_autor_data(&json!({
            "name": "Ana María Matute",
            "bio": "Novelista española."
        }));
        assert_eq!(
            from_bio.data().unwrap().biografia,
            Some("Novelista española.".to_string())
        );

        let from_description = parse_external_autor_data(&json!({
            "name": "Ana María Matute",
            "description": "Miembro de la RAE."
        }));
        assert_eq!(
            from_description.data().unwrap().biografia,
            Some("Miembro de la RAE.".to_string())
        );

        // primary alias shadows the fallbacks
        let both = parse_external_autor_data(&json!({
            "name": "Ana María Matute",
            "biografia": "primaria",
            "description": "secundaria"
        }));
        assert_eq!(both.data().unwrap().biografia, Some("primaria".to_string()));
    }

    #[test]
    fn test_overlong_biografia_is_truncated_not_rejected() {
        let long = "b".repeat(MAX_BIOGRAFIA + 500);
        let result = parse_external_autor_data(&json!({
            "name": "Ana María Matute",
            "bio": long
        }));
        let biografia = result.data().unwrap().biografia.unwrap();
        assert_eq!(biografia.chars().count(), MAX_BIOGRAFIA);
    }

    #[test]
    fn test_photo_alias_chain_and_silent_drop() {
        let valid = parse_external_autor_data(&json!({
            "name": "Julio Cortázar",
            "image": "https://covers.example.com/jc.jpg"
        }));
        assert_eq!(
            valid.data().unwrap().foto,
            Some("https://covers.example.com/jc.jpg".to_string())
        );

        let invalid = parse_external_autor_data(&json!({
            "name": "Julio Cortázar",
            "photo": "no es una url"
        }));
        let data = invalid.data().unwrap();
        assert_eq!(data.foto, None);
    }

    #[test]
    fn test_external_ids_validated_and_dropped_silently() {
        let result = parse_external_autor_data(&json!({
            "name": "Julio Cortázar",
            "openLibraryKey": "OL26320A",
            "googleBooksId": "id with spaces"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.open_library_key, Some("OL26320A".to_string()));
        assert_eq!(data.google_books_id, None);
    }

    #[test]
    fn test_missing_name_fails_the_record() {
        let result = parse_external_autor_data(&json!({ "bio": "sin nombre" }));
        assert_eq!(
            result.errors(),
            ["external author payload has no usable name"]
        );

        let blank = parse_external_autor_data(&json!({ "name": "   " }));
        assert!(!blank.is_valid());

        let markup_only = parse_external_autor_data(&json!({ "name": "<b></b>" }));
        assert!(!markup_only.is_valid());
    }

    #[test]
    fn test_non_string_name_is_ignored() {
        let result = parse_external_autor_data(&json!({ "name": 42 }));
        assert!(!result.is_valid());
    }
}
