//! Listing and pagination defaults, keyed by entity.
//!
//! Every parser reads its page-size rules from this table so the limits
//! stay consistent across entities.

/// First page number. Pages are 1-indexed.
pub const DEFAULT_PAGE: u32 = 1;

/// Global upper bound on page size, regardless of entity.
pub const MAX_LIMIT: u32 = 100;

/// Search terms shorter than this (after trimming) are dropped.
pub const MIN_SEARCH_LEN: usize = 2;

/// Entities served by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entidad {
    Autor,
    Libro,
    Resena,
    Usuario,
    Notificacion,
}

/// What to do with a parsed limit above `max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitOverflow {
    /// Fall back to the entity default.
    UseDefault,
    /// Cap at `max_limit`.
    Clamp,
}

/// Page-size rules for one entity.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    /// Default page size when the query supplies none (or an unusable one).
    pub limit: u32,
    /// Upper bound on the page size for this entity.
    pub max_limit: u32,
    /// Behavior when the requested limit exceeds `max_limit`.
    pub overflow: LimitOverflow,
}

impl Entidad {
    /// Page-size rules for this entity.
    ///
    /// Notifications page larger by default and cap lower; oversized
    /// requests are clamped there instead of reset.
    pub const fn page_defaults(self) -> PageDefaults {
        match self {
            Entidad::Notificacion => PageDefaults {
                limit: 20,
                max_limit: 50,
                overflow: LimitOverflow::Clamp,
            },
            _ => PageDefaults {
                limit: 12,
                max_limit: MAX_LIMIT,
                overflow: LimitOverflow::UseDefault,
            },
        }
    }
}
