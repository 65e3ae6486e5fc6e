//! Store-agnostic query construction for Librario listings.
//!
//! Filter objects parsed by the validation layer are mapped here into
//! [`predicate::Predicate`] trees: boolean expressions built from
//! equality, substring match, OR, NOT-IN, and explicit-null checks. The
//! persistence layer renders a tree into whatever its engine speaks; the
//! JSON form produced by [`predicate::Predicate::to_query`] is the
//! exchange format.
//!
//! # Example
//!
//! ```ignore
//! use librario_query::prelude::*;
//!
//! let query = build_resena_query(&filters);
//! repo.list(query.to_query(), filters.pagination).await?;
//! ```

pub mod builders;
pub mod predicate;

/// Prelude module - import everything you need with `use librario_query::prelude::*`
pub mod prelude {
    pub use crate::builders::{
        build_autor_query, build_libro_query, build_resena_query, build_usuario_query,
    };
    pub use crate::predicate::Predicate;
}
