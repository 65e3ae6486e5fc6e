//! Per-entity query builders: filter object in, predicate tree out.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;

use librario_common::filters::{AutorFilters, LibroFilters, ResenaFilters, UsuarioFilters};
use librario_common::types::EstadoResena;

use crate::predicate::Predicate;

lazy_static! {
    static ref ALL_DIGITS: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Author listing query: the search term matches nombre or apellido.
pub fn build_autor_query(filters: &AutorFilters) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(term) = &filters.search {
        clauses.push(Predicate::or(vec![
            Predicate::like("nombre", term.as_str()),
            Predicate::like("apellido", term.as_str()),
        ]));
    }

    Predicate::and(clauses)
}

/// Book listing query: title search plus relation-id equality.
pub fn build_libro_query(filters: &LibroFilters) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(term) = &filters.search {
        clauses.push(Predicate::like("nombre", term.as_str()));
    }
    if let Some(autor_id) = filters.autor_id {
        clauses.push(Predicate::eq("autorId", json!(autor_id)));
    }
    if let Some(categoria_id) = filters.categoria_id {
        clauses.push(Predicate::eq("categoriaId", json!(categoria_id)));
    }
    if let Some(saga_id) = filters.saga_id {
        clauses.push(Predicate::eq("sagaId", json!(saga_id)));
    }

    Predicate::and(clauses)
}

/// User listing query: the search term matches any identity field.
pub fn build_usuario_query(filters: &UsuarioFilters) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(term) = &filters.search {
        clauses.push(Predicate::or(vec![
            Predicate::like("username", term.as_str()),
            Predicate::like("email", term.as_str()),
            Predicate::like("nombre", term.as_str()),
            Predicate::like("apellido", term.as_str()),
        ]));
    }
    if let Some(rol) = filters.rol {
        clauses.push(Predicate::eq("rol", rol.as_str()));
    }

    Predicate::and(clauses)
}

/// Review listing query.
///
/// Soft-deleted reviews are always excluded. Without an explicit estado
/// the listing hides flagged reviews; asking for an estado (including
/// `flagged`) overrides that.
pub fn build_resena_query(filters: &ResenaFilters) -> Predicate {
    let mut clauses = vec![Predicate::is_null("deletedAt")];

    if let Some(libro_id) = &filters.libro_id {
        clauses.push(libro_lookup(libro_id));
    }
    if let Some(usuario_id) = filters.usuario_id {
        clauses.push(Predicate::eq("usuarioId", json!(usuario_id)));
    }
    match filters.estado {
        Some(estado) => clauses.push(Predicate::eq("estado", estado.as_str())),
        None => clauses.push(Predicate::not_in(
            "estado",
            vec![json!(EstadoResena::Flagged.as_str())],
        )),
    }

    Predicate::and(clauses)
}

/// A book reference that is all digits may be either a local row id or an
/// external catalogue id that happens to be numeric, so both columns are
/// tried. Anything else can only be an external id.
fn libro_lookup(libro_id: &str) -> Predicate {
    if ALL_DIGITS.is_match(libro_id) {
        if let Ok(id) = libro_id.parse::<i64>() {
            return Predicate::or(vec![
                Predicate::eq("id", json!(id)),
                Predicate::eq("externalId", libro_id),
            ]);
        }
    }
    Predicate::eq("externalId", libro_id)
}
