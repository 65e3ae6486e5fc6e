//! Author payload parsing.

use serde::Serialize;
use serde_json::Value;

use librario_common::defaults::Entidad;
use librario_common::filters::AutorFilters;
use librario_common::types::{OrdenAutor, Patch, ValidationResult};

use crate::input::{
    as_object, optional_external_id, optional_text, optional_url, patch_external_id,
    patch_required_text, patch_text, patch_url, require_text, search_term, ErrorList,
};
use crate::validators::{parse_numeric_id, validate_pagination};

/// Validated author create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAutor {
    pub nombre: String,
    pub apellido: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biografia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
    #[serde(rename = "googleBooksId", skip_serializing_if = "Option::is_none")]
    pub google_books_id: Option<String>,
    #[serde(rename = "openLibraryKey", skip_serializing_if = "Option::is_none")]
    pub open_library_key: Option<String>,
}

/// Validated author update payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateAutor {
    pub nombre: Patch<String>,
    pub apellido: Patch<String>,
    pub biografia: Patch<String>,
    pub foto: Patch<String>,
    pub google_books_id: Patch<String>,
    pub open_library_key: Patch<String>,
}

impl UpdateAutor {
    /// Whether the payload touches no recognized field.
    pub fn is_empty(&self) -> bool {
        self.nombre.is_absent()
            && self.apellido.is_absent()
            && self.biografia.is_absent()
            && self.foto.is_absent()
            && self.google_books_id.is_absent()
            && self.open_library_key.is_absent()
    }
}

/// Validate an author create body.
pub fn parse_autor_input(body: &Value) -> ValidationResult<CreateAutor> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let nombre = errors.capture(require_text(body, "nombre", 1, 200));
    let apellido = errors.capture(require_text(body, "apellido", 1, 200));
    let biografia = errors.capture(optional_text(body, "biografia", 0, 10_000));
    let foto = errors.capture(optional_url(body, "foto"));
    let google_books_id = errors.capture(optional_external_id(body, "googleBooksId"));
    let open_library_key = errors.capture(optional_external_id(body, "openLibraryKey"));

    match (
        nombre,
        apellido,
        biografia,
        foto,
        google_books_id,
        open_library_key,
    ) {
        (
            Some(nombre),
            Some(apellido),
            Some(biografia),
            Some(foto),
            Some(google_books_id),
            Some(open_library_key),
        ) => ValidationResult::Valid(CreateAutor {
            nombre,
            apellido,
            biografia,
            foto,
            google_books_id,
            open_library_key,
        }),
        _ => errors.into_invalid(),
    }
}

/// Validate an author update body. Only keys present in the body are
/// touched; explicit null clears an optional field.
pub fn parse_autor_update_input(body: &Value) -> ValidationResult<UpdateAutor> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let nombre = errors.capture(patch_required_text(body, "nombre", 1, 200));
    let apellido = errors.capture(patch_required_text(body, "apellido", 1, 200));
    let biografia = errors.capture(patch_text(body, "biografia", 0, 10_000));
    let foto = errors.capture(patch_url(body, "foto"));
    let google_books_id = errors.capture(patch_external_id(body, "googleBooksId"));
    let open_library_key = errors.capture(patch_external_id(body, "openLibraryKey"));

    match (
        nombre,
        apellido,
        biografia,
        foto,
        google_books_id,
        open_library_key,
    ) {
        (
            Some(nombre),
            Some(apellido),
            Some(biografia),
            Some(foto),
            Some(google_books_id),
            Some(open_library_key),
        ) => {
            let update = UpdateAutor {
                nombre,
                apellido,
                biografia,
                foto,
                google_books_id,
                open_library_key,
            };
            if update.is_empty() {
                return ValidationResult::fail("no fields to update");
            }
            ValidationResult::Valid(update)
        }
        _ => errors.into_invalid(),
    }
}

/// Build author listing filters from a query map. Never fails; unusable
/// values fall back or are dropped.
pub fn parse_autor_filters(query: &Value) -> AutorFilters {
    let Some(query) = as_object(query) else {
        return AutorFilters::default();
    };

    AutorFilters {
        search: search_term(query.get("search")),
        orden: query
            .get("orden")
            .and_then(Value::as_str)
            .and_then(OrdenAutor::parse)
            .unwrap_or_default(),
        pagination: validate_pagination(query.get("page"), query.get("limit"), Entidad::Autor),
    }
}

/// Validate a path/param author id.
pub fn validate_autor_id(value: &Value) -> ValidationResult<i64> {
    match parse_numeric_id(value) {
        Some(id) => ValidationResult::Valid(id),
        None => ValidationResult::fail("invalid autor id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use librario_common::types::Pagination;
    use serde_json::json;

    #[test]
    fn test_create_accepts_plain_names_unchanged() {
        let result = parse_autor_input(&json!({
            "nombre": "Gabriel",
            "apellido": "García Márquez"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Gabriel");
        assert_eq!(data.apellido, "García Márquez");
        assert_eq!(data.biografia, None);
        assert_eq!(data.foto, None);
    }

    #[test]
    fn test_create_collects_every_error() {
        let result = parse_autor_input(&json!({
            "apellido": 42,
            "foto": "not a url",
            "googleBooksId": "has space"
        }));
        assert_eq!(
            result.errors(),
            [
                "nombre is required",
                "apellido must be a string",
                "foto must be a valid URL",
                "googleBooksId must be 1-100 characters from letters, numbers, underscores, and hyphens",
            ]
        );
    }

    #[test]
    fn test_create_sanitizes_free_text() {
        let result = parse_autor_input(&json!({
            "nombre": "  Julio ",
            "apellido": "Cortázar",
            "biografia": "<script>alert(1)</script>Autor de <b>Rayuela</b>"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Julio");
        assert_eq!(data.biografia, Some("Autor de Rayuela".to_string()));
    }

    #[test]
    fn test_create_rejects_non_object_body() {
        let result = parse_autor_input(&json!("nombre=Gabriel"));
        assert_eq!(result.errors(), ["request body must be an object"]);
    }

    #[test]
    fn test_update_null_clears_optional_field() {
        let result = parse_autor_update_input(&json!({ "biografia": null }));
        let update = result.data().unwrap();
        assert_eq!(update.biografia, Patch::Clear);
        assert!(update.nombre.is_absent());
    }

    #[test]
    fn test_update_null_on_required_field_is_an_error() {
        let result = parse_autor_update_input(&json!({ "nombre": null }));
        assert_eq!(result.errors(), ["nombre cannot be null"]);
    }

    #[test]
    fn test_update_empty_body_is_rejected() {
        let result = parse_autor_update_input(&json!({}));
        assert_eq!(result.errors(), ["no fields to update"]);
    }

    #[test]
    fn test_update_unknown_keys_only_is_rejected() {
        let result = parse_autor_update_input(&json!({ "slug": "ggm", "votos": 3 }));
        assert_eq!(result.errors(), ["no fields to update"]);
    }

    #[test]
    fn test_filters_default_on_empty_query() {
        let filters = parse_autor_filters(&json!({}));
        assert_eq!(filters, AutorFilters::default());
        assert_eq!(filters.pagination, Pagination { page: 1, limit: 12 });
    }

    #[test]
    fn test_filters_drop_short_search_and_bad_orden() {
        let filters = parse_autor_filters(&json!({
            "search": " g ",
            "orden": "votos",
            "page": "2"
        }));
        assert_eq!(filters.search, None);
        assert_eq!(filters.orden, OrdenAutor::Nombre);
        assert_eq!(filters.pagination.page, 2);
    }

    #[test]
    fn test_filters_keep_valid_values() {
        let filters = parse_autor_filters(&json!({
            "search": "  borges  ",
            "orden": "createdAt",
            "limit": 30
        }));
        assert_eq!(filters.search, Some("borges".to_string()));
        assert_eq!(filters.orden, OrdenAutor::CreatedAt);
        assert_eq!(filters.pagination.limit, 30);
    }

    #[test]
    fn test_validate_autor_id() {
        assert_eq!(validate_autor_id(&json!("7")).data(), Some(7));
        assert_eq!(
            validate_autor_id(&json!(0)).errors(),
            ["invalid autor id"]
        );
    }
}
