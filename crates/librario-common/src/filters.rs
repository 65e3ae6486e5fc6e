//! Typed filter objects for the listing endpoints.
//!
//! A filter object is the bounded description of a search: an optional
//! free-text term, optional relation ids, an enumerated sort key, and
//! pagination that is always present. Filter parsers in `aduana` produce
//! these; the query builders in `librario-query` consume them.

use serde::Serialize;

use crate::defaults::Entidad;
use crate::types::{
    EstadoResena, OrdenAutor, OrdenLibro, OrdenResena, OrdenUsuario, Pagination, Rol,
};

/// Author listing filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutorFilters {
    /// Free-text term matched against nombre and apellido
    pub search: Option<String>,
    pub orden: OrdenAutor,
    pub pagination: Pagination,
}

impl Default for AutorFilters {
    fn default() -> Self {
        AutorFilters {
            search: None,
            orden: OrdenAutor::default(),
            pagination: Pagination::default_for(Entidad::Autor),
        }
    }
}

/// Book listing filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibroFilters {
    /// Free-text term matched against nombre
    pub search: Option<String>,
    pub autor_id: Option<i64>,
    pub categoria_id: Option<i64>,
    pub saga_id: Option<i64>,
    pub orden: OrdenLibro,
    pub pagination: Pagination,
}

impl Default for LibroFilters {
    fn default() -> Self {
        LibroFilters {
            search: None,
            autor_id: None,
            categoria_id: None,
            saga_id: None,
            orden: OrdenLibro::default(),
            pagination: Pagination::default_for(Entidad::Libro),
        }
    }
}

/// User listing filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsuarioFilters {
    /// Free-text term matched against username, email, nombre, apellido
    pub search: Option<String>,
    pub rol: Option<Rol>,
    pub orden: OrdenUsuario,
    pub pagination: Pagination,
}

impl Default for UsuarioFilters {
    fn default() -> Self {
        UsuarioFilters {
            search: None,
            rol: None,
            orden: OrdenUsuario::default(),
            pagination: Pagination::default_for(Entidad::Usuario),
        }
    }
}

/// Review listing filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResenaFilters {
    /// Book reference as sent by the client. May be a numeric id in
    /// decimal form or an external catalogue id; the query builder
    /// decides which lookup applies.
    pub libro_id: Option<String>,
    pub usuario_id: Option<i64>,
    /// Explicit moderation state. When absent, listings exclude flagged
    /// reviews.
    pub estado: Option<EstadoResena>,
    pub orden: OrdenResena,
    pub pagination: Pagination,
}

impl Default for ResenaFilters {
    fn default() -> Self {
        ResenaFilters {
            libro_id: None,
            usuario_id: None,
            estado: None,
            orden: OrdenResena::default(),
            pagination: Pagination::default_for(Entidad::Resena),
        }
    }
}

/// Notification listing filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificacionFilters {
    /// Restrict the listing to unread notifications
    pub no_leidas: bool,
    pub pagination: Pagination,
}

impl Default for NotificacionFilters {
    fn default() -> Self {
        NotificacionFilters {
            no_leidas: false,
            pagination: Pagination::default_for(Entidad::Notificacion),
        }
    }
}
