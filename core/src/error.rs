//! Error types for collection operations.
//!
//! # Design
//! Only failures a pure operation can produce live here. Persistence
//! and transport failures belong to the server crate.

use thiserror::Error;

/// Errors returned by `Collection` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A create draft had no usable `title`.
    #[error("missing title")]
    MissingTitle,

    /// No todo carries the requested id.
    #[error("todo not found")]
    NotFound,

    /// The highest stored id is `i64::MAX`; there is no next id to hand out.
    #[error("no ids left to assign")]
    IdsExhausted,
}
