//! Domain modules: per-entity payload parsing.

pub mod autor;
pub mod libro;
pub mod notificacion;
pub mod resena;
pub mod usuario;
