//! Core data types for the notes service.
//!
//! Identifiers are UUID newtypes so that user ids and note ids cannot be
//! confused at compile time. [`Note`] is the canonical JSON representation of
//! a note as returned by the API: field names follow the wire contract
//! (`_id`, `createdAt`, `ownerId`), not Rust conventions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random UserId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Note
// ============================================================================

/// A note as serialized on the wire.
///
/// Every note has exactly one owner, assigned at creation and never
/// reassigned. Title and content are non-empty; the handlers validate this
/// before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier.
    #[serde(rename = "_id")]
    pub id: NoteId,
    /// Title of the note.
    pub title: String,
    /// Body of the note.
    pub content: String,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// The user who created the note.
    #[serde(rename = "ownerId")]
    pub owner_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note() -> Note {
        Note {
            id: NoteId::from_uuid(Uuid::nil()),
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            owner_id: UserId::from_uuid(Uuid::nil()),
        }
    }

    #[test]
    fn test_note_wire_field_names() {
        let json = serde_json::to_value(sample_note()).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("title").is_some());
        assert!(json.get("content").is_some());
        // Rust-side names must not leak into the JSON
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn test_note_round_trip() {
        let note = sample_note();
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note, back);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::nil()));
    }
}
