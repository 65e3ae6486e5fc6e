//! User payload parsing: registration, profile updates, password
//! changes.

use serde::Serialize;
use serde_json::Value;

use librario_common::defaults::Entidad;
use librario_common::filters::UsuarioFilters;
use librario_common::types::{OrdenUsuario, Patch, Rol, ValidationResult};

use crate::input::{
    as_object, optional_text, patch_text, require_string, search_term, Body, ErrorList,
};
use crate::validators::{
    parse_numeric_id, validate_email, validate_pagination, validate_password, validate_user_role,
    validate_username,
};

/// Validated registration payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUsuario {
    pub email: String,
    pub username: String,
    pub password: String,
    pub rol: Rol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
}

/// Validated profile update payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateUsuario {
    pub nombre: Patch<String>,
    pub apellido: Patch<String>,
    pub email: Patch<String>,
    pub rol: Patch<Rol>,
}

impl UpdateUsuario {
    /// Whether the payload touches no recognized field.
    pub fn is_empty(&self) -> bool {
        self.nombre.is_absent()
            && self.apellido.is_absent()
            && self.email.is_absent()
            && self.rol.is_absent()
    }
}

/// Validated password change payload.
///
/// Both values stay plain strings here; hashing and verification belong
/// to the auth layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CambioPassword {
    pub current_password: String,
    pub new_password: String,
}

/// Validate a registration body.
pub fn parse_usuario_input(body: &Value) -> ValidationResult<CreateUsuario> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let email = errors.capture(
        require_string(body, "email")
            .and_then(|raw| validate_email(&raw).map_err(String::from)),
    );
    let username = errors.capture(
        require_string(body, "username")
            .and_then(|raw| validate_username(&raw).map_err(String::from)),
    );
    let password = errors.capture_all(required_password(body, "password"));
    let rol = errors.capture(optional_rol(body));
    let nombre = errors.capture(optional_text(body, "nombre", 0, 100));
    let apellido = errors.capture(optional_text(body, "apellido", 0, 100));

    match (email, username, password, rol, nombre, apellido) {
        (Some(email), Some(username), Some(password), Some(rol), Some(nombre), Some(apellido)) => {
            ValidationResult::Valid(CreateUsuario {
                email,
                username,
                password,
                rol,
                nombre,
                apellido,
            })
        }
        _ => errors.into_invalid(),
    }
}

/// Validate a profile update body.
pub fn parse_usuario_update_input(body: &Value) -> ValidationResult<UpdateUsuario> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let nombre = errors.capture(patch_text(body, "nombre", 0, 100));
    let apellido = errors.capture(patch_text(body, "apellido", 0, 100));
    let email = errors.capture(patch_email(body));
    let rol = errors.capture(patch_rol(body));

    match (nombre, apellido, email, rol) {
        (Some(nombre), Some(apellido), Some(email), Some(rol)) => {
            let update = UpdateUsuario {
                nombre,
                apellido,
                email,
                rol,
            };
            if update.is_empty() {
                return ValidationResult::fail("no fields to update");
            }
            ValidationResult::Valid(update)
        }
        _ => errors.into_invalid(),
    }
}

/// Validate a password change body. The new password must differ from
/// the current one (compared as plain strings).
pub fn parse_password_change_input(body: &Value) -> ValidationResult<CambioPassword> {
    let Some(body) = as_object(body) else {
        return ValidationResult::fail("request body must be an object");
    };

    let mut errors = ErrorList::new();
    let current_password = errors.capture(require_string(body, "currentPassword"));
    let new_password = errors.capture_all(required_password(body, "newPassword"));

    match (current_password, new_password) {
        (Some(current_password), Some(new_password)) => {
            if new_password == current_password {
                return ValidationResult::fail(
                    "new password must be different from the current password",
                );
            }
            ValidationResult::Valid(CambioPassword {
                current_password,
                new_password,
            })
        }
        _ => errors.into_invalid(),
    }
}

/// Build user listing filters from a query map.
pub fn parse_usuario_filters(query: &Value) -> UsuarioFilters {
    let Some(query) = as_object(query) else {
        return UsuarioFilters::default();
    };

    UsuarioFilters {
        search: search_term(query.get("search")),
        rol: query
            .get("rol")
            .and_then(Value::as_str)
            .and_then(validate_user_role),
        orden: query
            .get("orden")
            .and_then(Value::as_str)
            .and_then(OrdenUsuario::parse)
            .unwrap_or_default(),
        pagination: validate_pagination(query.get("page"), query.get("limit"), Entidad::Usuario),
    }
}

/// Validate a path/param user id.
pub fn validate_usuario_id(value: &Value) -> ValidationResult<i64> {
    match parse_numeric_id(value) {
        Some(id) => ValidationResult::Valid(id),
        None => ValidationResult::fail("invalid usuario id"),
    }
}

/// A password field reports every violated strength rule at once;
/// a missing or non-string value is a single "required" error.
fn required_password(body: &Body, key: &str) -> Result<String, Vec<String>> {
    match body.get(key) {
        Some(Value::String(raw)) => match validate_password(raw) {
            Ok(()) => Ok(raw.clone()),
            Err(violations) => Err(violations
                .into_iter()
                .map(|violation| violation.replace("password", key))
                .collect()),
        },
        _ => Err(vec![format!("{key} is required")]),
    }
}

fn optional_rol(body: &Body) -> Result<Rol, String> {
    match body.get("rol") {
        None | Some(Value::Null) => Ok(Rol::default()),
        Some(Value::String(raw)) => {
            validate_user_role(raw).ok_or_else(|| rol_message())
        }
        Some(_) => Err(rol_message()),
    }
}

fn patch_rol(body: &Body) -> Result<Patch<Rol>, String> {
    match body.get("rol") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Err("rol cannot be null".to_string()),
        Some(Value::String(raw)) => validate_user_role(raw)
            .map(Patch::Set)
            .ok_or_else(|| rol_message()),
        Some(_) => Err(rol_message()),
    }
}

fn patch_email(body: &Body) -> Result<Patch<String>, String> {
    match body.get("email") {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Err("email cannot be null".to_string()),
        Some(Value::String(raw)) => validate_email(raw).map(Patch::Set).map_err(String::from),
        Some(_) => Err("email must be a string".to_string()),
    }
}

fn rol_message() -> String {
    "rol must be usuario, moderador, or admin".to_string()
}
