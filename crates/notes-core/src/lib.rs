//! notes-core: shared domain types for the notes service.
//!
//! This crate holds the pieces that both the storage layer and the HTTP
//! server need to agree on:
//!
//! - Identifier newtypes ([`UserId`], [`NoteId`]) and the wire-shape
//!   [`Note`] returned by every note endpoint
//! - Pagination parameters with defaults and an upper bound
//!   ([`PageParams`])
//! - Field-level request validation ([`Validator`], [`FieldError`])

pub mod pagination;
pub mod types;
pub mod validate;

pub use pagination::PageParams;
pub use types::{Note, NoteId, UserId};
pub use validate::{FieldError, Validator};
