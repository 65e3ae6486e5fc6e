//! Common types, errors, and defaults shared across Librario services.

pub mod defaults;
pub mod error;
pub mod filters;
pub mod types;

pub use defaults::Entidad;
pub use error::{AppError, AppResult};
pub use filters::*;
pub use types::*;
