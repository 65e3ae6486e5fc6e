//! Book payload parsing.

use serde::Serialize;
use serde_json::Value;

use librario_common::defaults::Entidad;
use librario_common::filters::LibroFilters;
use librario_common::types::{OrdenLibro, Patch, ValidationResult};

use crate::input::{
    as_object, optional_external_id, optional_text, optional_url, patch_external_id,
    patch_required_text, patch_text, patch_url, require_text, search_term, Body, ErrorList,
};
use crate::validators::{parse_numeric_id, validate_isbn, validate_pagination, validate_year};

const MAX_PAGINAS: i64 = 10_000;

/// Validated book create payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateLibro {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anio_publicacion: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginas: Option<i64>,
    /// Relation references travel unvalidated; the foreign-key
    /// constraint owns their integrity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saga: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Validated book update payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateLibro {
    pub nombre: Patch<String>,
    pub isbn: Patch<String>,
    pub anio_publicacion: Patch<i32>,
    pub descripcion: Patch<String>,
    pub imagen: Patch<String>,
    pub paginas: Patch<i64>,
    pub editorial: Patch<Value>,
    pub autor: Patch<Value>,
    pub categoria: Patch<Value>,
    pub saga: Patch<Value>,
    pub external_id: Patch<String>,
}

impl UpdateLibro {
    /// Whether the payload touches no recognized field.
    pub fn is_empty(&self) -> bool {
        self.nombre.is_absent()
            && self.isbn.is_absent()
            && self.anio_publicacion.is_absent()
            && self.descripcion.is_absent()
            && self.imagen.is_absent()
            && self.paginas.is_absent()
            && self.editorial.is_absent()
            && self.autor.is_absent()
            && self.categoria.is_absent()
            && self.saga.is_absent()
            && self.external_id.is_absent()
    }
}

/// Validate a book create body.
pub fn parse_libro_input(body: &Value) -> ValidationResult<CreateLibro> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let nombre = errors.capture(require_text(body, "nombre", 1, 500));
    let isbn = errors.capture(optional_isbn(body));
    let anio_publicacion = errors.capture(optional_year(body));
    let descripcion = errors.capture(optional_text(body, "descripcion", 0, 5_000));
    let imagen = errors.capture(optional_url(body, "imagen"));
    let paginas = errors.capture(optional_paginas(body));
    let external_id = errors.capture(optional_external_id(body, "external_id"));

    match (
        nombre,
        isbn,
        anio_publicacion,
        descripcion,
        imagen,
        paginas,
        external_id,
    ) {
        (
            Some(nombre),
            Some(isbn),
            Some(anio_publicacion),
            Some(descripcion),
            Some(imagen),
            Some(paginas),
            Some(external_id),
        ) => ValidationResult::Valid(CreateLibro {
            nombre,
            isbn,
            anio_publicacion,
            descripcion,
            imagen,
            paginas,
            editorial: relation_ref(body, "editorial"),
            autor: relation_ref(body, "autor"),
            categoria: relation_ref(body, "categoria"),
            saga: relation_ref(body, "saga"),
            external_id,
        }),
        _ => errors.into_invalid(),
    }
}

/// Validate a book update body.
pub fn parse_libro_update_input(body: &Value) -> ValidationResult<UpdateLibro> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let nombre = errors.capture(patch_required_text(body, "nombre", 1, 500));
    let isbn = errors.capture(patch_isbn(body));
    let anio_publicacion = errors.capture(patch_year(body));
    let descripcion = errors.capture(patch_text(body, "descripcion", 0, 5_000));
    let imagen = errors.capture(patch_url(body, "imagen"));
    let paginas = errors.capture(patch_paginas(body));
    let external_id = errors.capture(patch_external_id(body, "external_id"));

    match (
        nombre,
        isbn,
        anio_publicacion,
        descripcion,
        imagen,
        paginas,
        external_id,
    ) {
        (
            Some(nombre),
            Some(isbn),
            Some(anio_publicacion),
            Some(descripcion),
            Some(imagen),
            Some(paginas),
            Some(external_id),
        ) => {
            let update = UpdateLibro {
                nombre,
                isbn,
                anio_publicacion,
                descripcion,
                imagen,
                paginas,
                editorial: relation_patch(body, "editorial"),
                autor: relation_patch(body, "autor"),
                categoria: relation_patch(body, "categoria"),
                saga: relation_patch(body, "saga"),
                external_id,
            };
            if update.is_empty() {
                return ValidationResult::fail("no fields to update");
            }
            ValidationResult::Valid(update)
        }
        _ => errors.into_invalid(),
    }
}

/// Build book listing filters from a query map.
pub fn parse_libro_filters(query: &Value) -> LibroFilters {
    let Some(query) = as_object(query) else {
        return LibroFilters::default();
    };

    LibroFilters {
        search: search_term(query.get("search")),
        autor_id: query.get("autorId").and_then(parse_numeric_id),
        categoria_id: query.get("categoriaId").and_then(parse_numeric_id),
        saga_id: query.get("sagaId").and_then(parse_numeric_id),
        orden: query
            .get("orden")
            .and_then(Value::as_str)
            .and_then(OrdenLibro::parse)
            .unwrap_or_default(),
        pagination: validate_pagination(query.get("page"), query.get("limit"), Entidad::Libro),
    }
}

/// Validate a path/param book id.
pub fn validate_libro_id(value: &Value) -> ValidationResult<i64> {
    match parse_numeric_id(value) {
        Some(id) => ValidationResult::Valid(id),
        None => ValidationResult::fail("invalid libro id"),
    }
}

fn optional_isbn(body: &Body) -> Result<Option<String>, String> {
    match body.get("isbn") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => validate_isbn(raw).map(Some).map_err(String::from),
        Some(_) => Err("isbn must be a string".to_string()),
    }
}

fn patch_isbn(body: &Body) -> Result<Patch<String>, String> {
    match body.get("isbn") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(Value::String(raw)) => validate_isbn(raw).map(Patch::Set).map_err(String::from),
        Some(_) => Err("isbn must be a string".to_string()),
    }
}

fn optional_year(body: &Body) -> Result<Option<i32>, String> {
    match body.get("anio_publicacion") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match validate_year(value) {
            Some(year) => Ok(Some(year)),
            None => Err("anio_publicacion must be a valid year".to_string()),
        },
    }
}

fn patch_year(body: &Body) -> Result<Patch<i32>, String> {
    match body.get("anio_publicacion") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(value) => match validate_year(value) {
            Some(year) => Ok(Patch::Set(year)),
            None => Err("anio_publicacion must be a valid year".to_string()),
        },
    }
}

fn optional_paginas(body: &Body) -> Result<Option<i64>, String> {
    match body.get("paginas") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match parse_numeric_id(value).filter(|p| *p <= MAX_PAGINAS) {
            Some(paginas) => Ok(Some(paginas)),
            None => Err(format!("paginas must be between 1 and {MAX_PAGINAS}")),
        },
    }
}

fn patch_paginas(body: &Body) -> Result<Patch<i64>, String> {
    match body.get("paginas") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Clear),
        Some(value) => match parse_numeric_id(value).filter(|p| *p <= MAX_PAGINAS) {
            Some(paginas) => Ok(Patch::Set(paginas)),
            None => Err(format!("paginas must be between 1 and {MAX_PAGINAS}")),
        },
    }
}

fn relation_ref(body: &Body, key: &str) -> Option<Value> {
    body.get(key).filter(|value| !value.is_null()).cloned()
}

fn relation_patch(body: &Body, key: &str) -> Patch<Value> {
    match body.get(key) {
        None => Patch::Absent,
        Some(Value::Null) => Patch::Clear,
        Some(value) => Patch::Set(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_normalizes_isbn_separators() {
        let result = parse_libro_input(&json!({
            "nombre": "X",
            "isbn": "978-0-596-52068-7"
        }));
        let data = result.data().unwrap();
        assert_eq!(data.isbn, Some("9780596520687".to_string()));
    }

    #[test]
    fn test_create_requires_only_nombre() {
        let result = parse_libro_input(&json!({ "nombre": "Ficciones" }));
        let data = result.data().unwrap();
        assert_eq!(data.nombre, "Ficciones");
        assert_eq!(data.isbn, None);
        assert_eq!(data.paginas, None);
    }

    #[test]
    fn test_create_collects_errors_across_fields() {
        let result = parse_libro_input(&json!({
            "isbn": "123",
            "anio_publicacion": 99,
            "paginas": 0
        }));
        assert_eq!(
            result.errors(),
            [
                "nombre is required",
                "isbn must be 10 or 13 digits",
                "anio_publicacion must be a valid year",
                "paginas must be between 1 and 10000",
            ]
        );
    }

    #[test]
    fn test_create_passes_relation_refs_through_unchecked() {
        let result = parse_libro_input(&json!({
            "nombre": "Rayuela",
            "autor": 3,
            "saga": { "id": 9 }
        }));
        let data = result.data().unwrap();
        assert_eq!(data.autor, Some(json!(3)));
        assert_eq!(data.saga, Some(json!({ "id": 9 })));
        assert_eq!(data.editorial, None);
    }

    #[test]
    fn test_update_clears_isbn_with_null() {
        let result = parse_libro_update_input(&json!({ "isbn": null }));
        let update = result.data().unwrap();
        assert_eq!(update.isbn, Patch::Clear);
        assert!(update.nombre.is_absent());
    }

    #[test]
    fn test_update_relation_only_counts_as_change() {
        let result = parse_libro_update_input(&json!({ "categoria": 4 }));
        let update = result.data().unwrap();
        assert_eq!(update.categoria, Patch::Set(json!(4)));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_empty_and_unknown_keys_rejected() {
        assert_eq!(
            parse_libro_update_input(&json!({})).errors(),
            ["no fields to update"]
        );
        assert_eq!(
            parse_libro_update_input(&json!({ "portada": "x" })).errors(),
            ["no fields to update"]
        );
    }

    #[test]
    fn test_filters_parse_relation_ids_and_drop_garbage() {
        let filters = parse_libro_filters(&json!({
            "autorId": "7",
            "categoriaId": "x",
            "sagaId": -2,
            "search": "cien años",
            "orden": "anio_publicacion"
        }));
        assert_eq!(filters.autor_id, Some(7));
        assert_eq!(filters.categoria_id, None);
        assert_eq!(filters.saga_id, None);
        assert_eq!(filters.search, Some("cien años".to_string()));
        assert_eq!(filters.orden, OrdenLibro::AnioPublicacion);
    }

    #[test]
    fn test_filters_default_pagination() {
        let filters = parse_libro_filters(&json!({}));
        assert_eq!(filters.pagination.page, 1);
        assert_eq!(filters.pagination.limit, 12);
    }

    #[test]
    fn test_validate_libro_id() {
        assert_eq!(validate_libro_id(&json!(12)).data(), Some(12));
        assert_eq!(
            validate_libro_id(&json!("doce")).errors(),
            ["invalid libro id"]
        );
    }
}
