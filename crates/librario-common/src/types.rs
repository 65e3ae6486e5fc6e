//! Common types used across Librario services.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::defaults::{Entidad, DEFAULT_PAGE};
use crate::error::{AppError, AppResult};

/// Outcome of validating one untrusted payload.
///
/// Either the fully validated data or the complete, ordered list of
/// violations found in the payload. Validation never stops at the first
/// error, so the caller can surface everything in a single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult<T> {
    /// The payload passed every check; holds the typed record.
    Valid(T),
    /// One or more checks failed; holds every violation, in field order.
    Invalid(Vec<String>),
}

impl<T> ValidationResult<T> {
    /// Build an invalid result from a single message.
    pub fn fail(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(vec![message.into()])
    }

    /// Whether the payload was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The validated data, if any.
    pub fn data(self) -> Option<T> {
        match self {
            ValidationResult::Valid(data) => Some(data),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// The collected violations. Empty for a valid result.
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Invalid(errors) => errors,
        }
    }

    /// Map the validated data, leaving errors untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
        match self {
            ValidationResult::Valid(data) => ValidationResult::Valid(f(data)),
            ValidationResult::Invalid(errors) => ValidationResult::Invalid(errors),
        }
    }

    /// Convert into an [`AppResult`], joining violations into one
    /// validation error for handler code.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            ValidationResult::Valid(data) => Ok(data),
            ValidationResult::Invalid(errors) => Err(AppError::Validation(errors.join("; "))),
        }
    }
}

impl<T: Serialize> Serialize for ValidationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        match self {
            ValidationResult::Valid(data) => {
                state.serialize_field("valid", &true)?;
                state.serialize_field("data", data)?;
            }
            ValidationResult::Invalid(errors) => {
                state.serialize_field("valid", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

/// One field of an update payload.
///
/// Updates must tell apart "the key was not sent" from "the key was sent
/// as `null`": the former leaves the stored value unchanged, the latter
/// clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the payload; leave the stored value unchanged.
    Absent,
    /// Key present with an explicit `null`; clear the stored value.
    Clear,
    /// Key present with a validated value.
    Set(T),
}

impl<T> Patch<T> {
    /// Whether the key was missing from the payload.
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// The defaulted pagination for an entity with an empty query.
    pub fn default_for(entidad: Entidad) -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            limit: entidad.page_defaults().limit,
        }
    }

    /// Calculate offset for queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let limit = u64::from(pagination.limit.max(1));
        PaginatedResponse {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// User role in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    /// Regular account
    Usuario,
    /// Can act on flagged reviews
    Moderador,
    /// Full system access
    Admin,
}

impl Rol {
    /// Parse the wire form. Case-sensitive: `"Admin"` is not a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "usuario" => Some(Rol::Usuario),
            "moderador" => Some(Rol::Moderador),
            "admin" => Some(Rol::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Usuario => "usuario",
            Rol::Moderador => "moderador",
            Rol::Admin => "admin",
        }
    }
}

impl Default for Rol {
    fn default() -> Self {
        Rol::Usuario
    }
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation state of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoResena {
    /// Visible to everyone
    Aprobada,
    /// Awaiting moderation
    Pendiente,
    /// Rejected by a moderator
    Rechazada,
    /// Flagged by the scoring pipeline; hidden from default listings
    Flagged,
}

impl EstadoResena {
    /// Parse the wire form. Case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "aprobada" => Some(EstadoResena::Aprobada),
            "pendiente" => Some(EstadoResena::Pendiente),
            "rechazada" => Some(EstadoResena::Rechazada),
            "flagged" => Some(EstadoResena::Flagged),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoResena::Aprobada => "aprobada",
            EstadoResena::Pendiente => "pendiente",
            EstadoResena::Rechazada => "rechazada",
            EstadoResena::Flagged => "flagged",
        }
    }
}

impl std::fmt::Display for EstadoResena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort keys for author listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrdenAutor {
    #[serde(rename = "nombre")]
    Nombre,
    #[serde(rename = "apellido")]
    Apellido,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl OrdenAutor {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nombre" => Some(OrdenAutor::Nombre),
            "apellido" => Some(OrdenAutor::Apellido),
            "createdAt" => Some(OrdenAutor::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdenAutor::Nombre => "nombre",
            OrdenAutor::Apellido => "apellido",
            OrdenAutor::CreatedAt => "createdAt",
        }
    }
}

impl Default for OrdenAutor {
    fn default() -> Self {
        OrdenAutor::Nombre
    }
}

/// Sort keys for book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrdenLibro {
    #[serde(rename = "nombre")]
    Nombre,
    #[serde(rename = "anio_publicacion")]
    AnioPublicacion,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl OrdenLibro {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nombre" => Some(OrdenLibro::Nombre),
            "anio_publicacion" => Some(OrdenLibro::AnioPublicacion),
            "createdAt" => Some(OrdenLibro::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdenLibro::Nombre => "nombre",
            OrdenLibro::AnioPublicacion => "anio_publicacion",
            OrdenLibro::CreatedAt => "createdAt",
        }
    }
}

impl Default for OrdenLibro {
    fn default() -> Self {
        OrdenLibro::Nombre
    }
}

/// Sort keys for user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrdenUsuario {
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl OrdenUsuario {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "username" => Some(OrdenUsuario::Username),
            "createdAt" => Some(OrdenUsuario::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdenUsuario::Username => "username",
            OrdenUsuario::CreatedAt => "createdAt",
        }
    }
}

impl Default for OrdenUsuario {
    fn default() -> Self {
        OrdenUsuario::Username
    }
}

/// Sort keys for review listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrdenResena {
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "estrellas")]
    Estrellas,
}

impl OrdenResena {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(OrdenResena::CreatedAt),
            "estrellas" => Some(OrdenResena::Estrellas),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdenResena::CreatedAt => "createdAt",
            OrdenResena::Estrellas => "estrellas",
        }
    }
}

impl Default for OrdenResena {
    fn default() -> Self {
        OrdenResena::CreatedAt
    }
}
