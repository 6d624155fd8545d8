//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// A user with this username already exists.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// An active sharing relation for this (note, user) pair already exists.
    #[error("note {note_id} is already shared with user {user_id}")]
    AlreadyShared { note_id: Uuid, user_id: Uuid },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
