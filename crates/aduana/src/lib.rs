//! Aduana - validation gateway for the Librario backend.
//!
//! Every untrusted payload crossing the HTTP boundary passes through
//! here before it may touch the persistence layer: request bodies and
//! query-string maps arrive as `serde_json::Value` and leave as typed
//! records, filter objects, or a complete list of validation errors.
//!
//! All operations are pure, synchronous, and allocation-only; nothing in
//! this crate performs I/O or holds state across calls.

pub mod domain;
pub mod sanitize;
pub mod validators;

mod input;
