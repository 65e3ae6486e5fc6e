//! Notification query parsing.
//!
//! Notifications are produced by the backend and read-only at this
//! boundary: there is no create or update payload, only listing
//! filters and id validation.

use serde_json::Value;

use librario_common::defaults::Entidad;
use librario_common::filters::NotificacionFilters;
use librario_common::types::ValidationResult;

use crate::input::as_object;
use crate::validators::{coerce_flag, parse_numeric_id, validate_pagination};

/// Build notification listing filters from a query map.
pub fn parse_notificacion_filters(query: &Value) -> NotificacionFilters {
    let Some(query) = as_object(query) else {
        return NotificacionFilters::default();
    };

    NotificacionFilters {
        no_leidas: query.get("noLeidas").is_some_and(coerce_flag),
        pagination: validate_pagination(
            query.get("page"),
            query.get("limit"),
            Entidad::Notificacion,
        ),
    }
}

/// Validate a path/param notification id.
pub fn validate_notificacion_id(value: &Value) -> ValidationResult<i64> {
    match parse_numeric_id(value) {
        Some(id) => ValidationResult::Valid(id),
        None => ValidationResult::fail("invalid notificacion id"),
    }
}
