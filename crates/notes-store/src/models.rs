//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx queries.
//! They are separate from the wire types in notes-core; conversion happens at
//! the edge via [`NoteRow::into_note`].

use chrono::{DateTime, Utc};
use notes_core::{Note, NoteId, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC-format hash, never the plaintext.
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub owner_id: Uuid,
    pub created: DateTime<Utc>,
}

impl NoteRow {
    /// Convert into the wire representation.
    pub fn into_note(self) -> Note {
        Note {
            id: NoteId::from_uuid(self.id),
            title: self.title,
            content: self.content,
            created_at: self.created,
            owner_id: UserId::from_uuid(self.owner_id),
        }
    }
}

/// Database row for the `note_access` table (the sharing ledger).
///
/// A row with `revoked = false` means the user may view the note. The
/// owner's own row is created together with the note.
#[derive(Debug, Clone, FromRow)]
pub struct NoteAccessRow {
    pub note_id: Uuid,
    pub user_id: Uuid,
    pub revoked: bool,
    pub granted: DateTime<Utc>,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

/// Input for creating a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub owner_id: Uuid,
}

impl NewNote {
    pub fn new(title: String, content: String, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            owner_id,
        }
    }

    pub fn with_id(id: Uuid, title: String, content: String, owner_id: Uuid) -> Self {
        Self {
            id,
            title,
            content,
            owner_id,
        }
    }
}

/// Input for granting access to a note.
#[derive(Debug, Clone, Copy)]
pub struct NewNoteAccess {
    pub note_id: Uuid,
    pub user_id: Uuid,
}

impl NewNoteAccess {
    pub fn new(note_id: Uuid, user_id: Uuid) -> Self {
        Self { note_id, user_id }
    }
}
