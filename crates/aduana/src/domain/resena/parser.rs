//! Review payload parsing.

use serde::Serialize;
use serde_json::Value;

use librario_common::defaults::Entidad;
use librario_common::filters::ResenaFilters;
use librario_common::types::{OrdenResena, Patch, ValidationResult};

use crate::input::{as_object, patch_required_text, require_text, Body, ErrorList};
use crate::validators::{
    parse_numeric_id, validate_pagination, validate_rating, validate_resena_estado,
};

/// Validated review create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateResena {
    pub comentario: String,
    pub estrellas: u8,
    /// Book reference as sent: a decimal row id or an external
    /// catalogue id. The query layer decides which lookup applies.
    #[serde(rename = "libroId")]
    pub libro_id: String,
}

/// Validated reply payload. Replies carry no rating of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRespuesta {
    pub comentario: String,
}

/// Validated review update payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateResena {
    pub comentario: Patch<String>,
    pub estrellas: Patch<u8>,
}

impl UpdateResena {
    /// Whether the payload touches no recognized field.
    pub fn is_empty(&self) -> bool {
        self.comentario.is_absent() && self.estrellas.is_absent()
    }
}

/// Validate a review create body.
pub fn parse_resena_input(body: &Value) -> ValidationResult<CreateResena> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let comentario = errors.capture(require_text(body, "comentario", 10, 5_000));
    let estrellas = errors.capture(required_rating(body));
    let libro_id = errors.capture(libro_reference(body));

    match (comentario, estrellas, libro_id) {
        (Some(comentario), Some(estrellas), Some(libro_id)) => {
            ValidationResult::Valid(CreateResena {
                comentario,
                estrellas,
                libro_id,
            })
        }
        _ => errors.into_invalid(),
    }
}

/// Validate a reply-to-review body.
pub fn parse_resena_reply_input(body: &Value) -> ValidationResult<CreateRespuesta> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let comentario = errors.capture(require_text(body, "comentario", 10, 2_000));

    match comentario {
        Some(comentario) => ValidationResult::Valid(CreateRespuesta { comentario }),
        None => errors.into_invalid(),
    }
}

/// Validate a review update body.
pub fn parse_resena_update_input(body: &Value) -> ValidationResult<UpdateResena> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let comentario = errors.capture(patch_required_text(body, "comentario", 10, 5_000));
    let estrellas = errors.capture(patch_rating(body));

    match (comentario, estrellas) {
        (Some(comentario), Some(estrellas)) => {
            let update = UpdateResena {
                comentario,
                estrellas,
            };
            if update.is_empty() {
                return ValidationResult::fail("no fields to update");
            }
            ValidationResult::Valid(update)
        }
        _ => errors.into_invalid(),
    }
}

/// Build review listing filters from a query map.
pub fn parse_resena_filters(query: &Value) -> ResenaFilters {
    let Some(query) = as_object(query) else {
        return ResenaFilters::default();
    };

    let estado = query
        .get("estado")
        .and_then(Value::as_str)
        .and_then(validate_resena_estado);

    ResenaFilters {
        libro_id: libro_filter(query.get("libroId")),
        usuario_id: query.get("usuarioId").and_then(parse_numeric_id),
        estado,
        orden: query
            .get("orden")
            .and_then(Value::as_str)
            .and_then(OrdenResena::parse)
            .unwrap_or_default(),
        pagination: validate_pagination(query.get("page"), query.get("limit"), Entidad::Resena),
    }
}

/// Validate a path/param review id.
pub fn validate_resena_id(value: &Value) -> ValidationResult<i64> {
    match parse_numeric_id(value) {
        Some(id) => ValidationResult::Valid(id),
        None => ValidationResult::fail("invalid resena id"),
    }
}

fn required_rating(body: &Body) -> Result<u8, String> {
    match body.get("estrellas") {
        None | Some(Value::Null) => Err("estrellas is required".to_string()),
        Some(value) => validate_rating(value)
            .ok_or_else(|| "estrellas must be an integer between 1 and 5".to_string()),
    }
}

fn patch_rating(body: &Body) -> Result<Patch<u8>, String> {
    match body.get("estrellas") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Err("estrellas cannot be null".to_string()),
        Some(value) => validate_rating(value)
            .map(Patch::Set)
            .ok_or_else(|| "estrellas must be an integer between 1 and 5".to_string()),
    }
}

/// The book reference is checked for presence only; numeric values are
/// normalized to their decimal form.
fn libro_reference(body: &Body) -> Result<String, String> {
    match body.get("libroId") {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Ok(raw.trim().to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        _ => Err("libroId is required".to_string()),
    }
}

fn libro_filter(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}
