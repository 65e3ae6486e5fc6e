//! Predicate trees and their query-document rendering.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A store-agnostic boolean expression over entity fields.
///
/// Trees are built by the query builders and rendered with
/// [`Predicate::to_query`] into a flat JSON document the persistence
/// layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals a value
    Eq { field: String, value: Value },
    /// Field contains the term (matched as `%term%`)
    Like { field: String, term: String },
    /// At least one child matches
    Or(Vec<Predicate>),
    /// Every child matches
    And(Vec<Predicate>),
    /// Field value is outside the given set
    NotIn { field: String, values: Vec<Value> },
    /// Field is explicitly null
    IsNull { field: String },
}

impl Predicate {
    /// Equality on a single field
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Substring match on a single field
    pub fn like(field: impl Into<String>, term: impl Into<String>) -> Self {
        Predicate::Like {
            field: field.into(),
            term: term.into(),
        }
    }

    /// OR across children
    pub fn or(children: Vec<Predicate>) -> Self {
        Predicate::Or(children)
    }

    /// AND across children
    pub fn and(children: Vec<Predicate>) -> Self {
        Predicate::And(children)
    }

    /// Set exclusion on a single field
    pub fn not_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Predicate::NotIn {
            field: field.into(),
            values,
        }
    }

    /// Explicit-null check on a single field
    pub fn is_null(field: impl Into<String>) -> Self {
        Predicate::IsNull {
            field: field.into(),
        }
    }

    /// Render the tree as a query document.
    ///
    /// A top-level `And` merges its children into one object (the
    /// implicit AND of a flat document); if two children constrain the
    /// same field the render falls back to an explicit `$and` list.
    pub fn to_query(&self) -> Value {
        match self {
            Predicate::Eq { field, value } => entry(field, value.clone()),
            Predicate::Like { field, term } => {
                entry(field, json!({ "$like": format!("%{term}%") }))
            }
            Predicate::Or(children) => entry(
                "$or",
                Value::Array(children.iter().map(Predicate::to_query).collect()),
            ),
            Predicate::And(children) => {
                let rendered: Vec<Value> = children.iter().map(Predicate::to_query).collect();
                let mut merged = Map::new();
                for document in &rendered {
                    if let Value::Object(fields) = document {
                        for (key, value) in fields {
                            if merged.contains_key(key) {
                                return entry("$and", Value::Array(rendered.clone()));
                            }
                            merged.insert(key.clone(), value.clone());
                        }
                    }
                }
                Value::Object(merged)
            }
            Predicate::NotIn { field, values } => entry(field, json!({ "$nin": values })),
            Predicate::IsNull { field } => entry(field, Value::Null),
        }
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_query().serialize(serializer)
    }
}

fn entry(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_renders_flat_field() {
        let predicate = Predicate::eq("autorId", 7);
        assert_eq!(predicate.to_query(), json!({ "autorId": 7 }));
    }

    #[test]
    fn test_like_wraps_term_both_sides() {
        let predicate = Predicate::like("nombre", "garcia");
        assert_eq!(
            predicate.to_query(),
            json!({ "nombre": { "$like": "%garcia%" } })
        );
    }

    #[test]
    fn test_is_null_renders_explicit_null() {
        assert_eq!(
            Predicate::is_null("deletedAt").to_query(),
            json!({ "deletedAt": null })
        );
    }

    #[test]
    fn test_not_in_renders_nin_list() {
        let predicate = Predicate::not_in("estado", vec![json!("flagged")]);
        assert_eq!(
            predicate.to_query(),
            json!({ "estado": { "$nin": ["flagged"] } })
        );
    }

    #[test]
    fn test_and_merges_distinct_fields() {
        let predicate = Predicate::and(vec![
            Predicate::is_null("deletedAt"),
            Predicate::eq("usuarioId", 3),
        ]);
        assert_eq!(
            predicate.to_query(),
            json!({ "deletedAt": null, "usuarioId": 3 })
        );
    }

    #[test]
    fn test_and_with_colliding_fields_falls_back_to_and_list() {
        let predicate = Predicate::and(vec![
            Predicate::eq("estado", "aprobada"),
            Predicate::not_in("estado", vec![json!("flagged")]),
        ]);
        assert_eq!(
            predicate.to_query(),
            json!({ "$and": [
                { "estado": "aprobada" },
                { "estado": { "$nin": ["flagged"] } }
            ]})
        );
    }

    #[test]
    fn test_empty_and_matches_everything() {
        assert_eq!(Predicate::and(vec![]).to_query(), json!({}));
    }

    #[test]
    fn test_or_renders_children_in_order() {
        let predicate = Predicate::or(vec![
            Predicate::like("nombre", "b"),
            Predicate::like("apellido", "b"),
        ]);
        assert_eq!(
            predicate.to_query(),
            json!({ "$or": [
                { "nombre": { "$like": "%b%" } },
                { "apellido": { "$like": "%b%" } }
            ]})
        );
    }

    #[test]
    fn test_serialize_matches_to_query() {
        let predicate = Predicate::eq("rol", "admin");
        assert_eq!(serde_json::to_value(&predicate).unwrap(), predicate.to_query());
    }
}
