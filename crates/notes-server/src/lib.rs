//! notes-server: HTTP API server for the notes service.
//!
//! This crate provides:
//! - REST endpoints for authentication (signup, login, token refresh) and
//!   notes (CRUD, sharing, full-text search)
//! - JWT bearer authentication; every note operation is gated by the
//!   [`auth::AuthenticatedUser`] extractor
//! - A middleware stack for request tracing, CORS, and request IDs
//!
//! # Architecture
//!
//! Handlers are thin: they validate the request, resolve the acting user,
//! and delegate to the store. All shared state lives in [`AppState`], which
//! is built once in `main` and cloned per request.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
