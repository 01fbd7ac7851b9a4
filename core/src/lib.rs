//! Domain core for the file-backed todo service.
//!
//! # Overview
//! Holds the todo record, the ordered collection, and the pure operations the
//! HTTP layer runs against a freshly loaded snapshot: filter, lookup, insert,
//! partial update, and removal. No I/O happens here; the server crate loads
//! and persists snapshots around these calls.
//!
//! # Design
//! - `Todo` wraps a JSON object so unknown client fields round-trip.
//! - Operations consume a `Collection` and return the next one, making the
//!   read-modify-write cycle explicit at the call site.
//! - Path ids are parsed leniently; a malformed id is simply "not found".

pub mod collection;
pub mod error;
pub mod id;
pub mod types;

pub use error::CollectionError;
pub use id::{id_segment, parse_id};
pub use types::{is_present, Collection, Fields, Todo};
