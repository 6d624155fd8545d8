//! Note routes: CRUD plus sharing.
//!
//! - GET /api/notes - Paginated list of accessible notes
//! - POST /api/notes - Create a note
//! - GET /api/notes/{id} - Fetch one note (owner only)
//! - PUT /api/notes/{id} - Partial update (owner only)
//! - DELETE /api/notes/{id} - Delete (owner only)
//! - POST /api/notes/{id}/share - Share with another user (owner only)
//! - DELETE /api/notes/{id}/share/{user_id} - Revoke a share (owner only)
//!
//! Listing covers everything the ledger grants (owned and shared-to);
//! direct get/update/delete are scoped to ownership. A note that exists but
//! belongs to someone else is answered exactly like a note that does not
//! exist.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use notes_core::{Note, PageParams, Validator};
use notes_store::{NewNote, NewNoteAccess};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Missing fields deserialize to `None` so the handler can answer with
/// field-level validation errors instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShareNoteRequest {
    /// The user to share the note with.
    #[serde(default, rename = "receiverId")]
    pub receiver_id: Option<Uuid>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Missing and not-owned collapse into the same answer, so a response can
/// never confirm that someone else's note exists.
fn note_not_found() -> ApiError {
    ApiError::NotFound("Note not found for the authenticated user".to_string())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/notes - Paginated list of the caller's accessible notes.
///
/// The accessible set is the union of owned and shared-to notes, resolved
/// through the ledger first and then batch-fetched, ordered by creation.
async fn list_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Vec<Note>>> {
    let store = state.store();

    let ids = store.list_accessible_note_ids(user.user_id).await?;
    let rows = store
        .fetch_notes_page(&ids, page.limit(), page.offset())
        .await?;

    Ok(Json(rows.into_iter().map(|row| row.into_note()).collect()))
}

/// GET /api/notes/{id} - Fetch a single note. Owner only.
async fn get_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let row = state
        .store()
        .get_note_owned(note_id, user.user_id)
        .await?
        .ok_or_else(note_not_found)?;

    Ok(Json(row.into_note()))
}

/// POST /api/notes - Create a note owned by the caller.
///
/// The owner's ledger row is written in the same transaction as the note.
async fn create_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let title = request.title.as_deref().unwrap_or("");
    let content = request.content.as_deref().unwrap_or("");

    let mut v = Validator::new();
    v.require("title", title, "Title is required")
        .require("content", content, "Content is required");
    v.finish().map_err(ApiError::Validation)?;

    let row = state
        .store()
        .insert_note(&NewNote::new(
            title.to_string(),
            content.to_string(),
            user.user_id,
        ))
        .await?;

    tracing::info!(note_id = %row.id, owner_id = %user.user_id, "Note created");

    Ok((StatusCode::CREATED, Json(row.into_note())))
}

/// PUT /api/notes/{id} - Update title and/or content. Owner only.
async fn update_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(note_id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let mut v = Validator::new();
    if let Some(title) = &request.title {
        v.require("title", title, "Title cannot be empty");
    }
    if let Some(content) = &request.content {
        v.require("content", content, "Content cannot be empty");
    }
    v.finish().map_err(ApiError::Validation)?;

    let row = state
        .store()
        .update_note_owned(
            note_id,
            user.user_id,
            request.title.as_deref(),
            request.content.as_deref(),
        )
        .await?
        .ok_or_else(note_not_found)?;

    tracing::info!(note_id = %note_id, owner_id = %user.user_id, "Note updated");

    Ok(Json(row.into_note()))
}

/// DELETE /api/notes/{id} - Delete a note. Owner only.
async fn delete_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .store()
        .delete_note_owned(note_id, user.user_id)
        .await?;

    if !deleted {
        return Err(note_not_found());
    }

    tracing::info!(note_id = %note_id, owner_id = %user.user_id, "Note deleted");

    Ok(Json(MessageResponse::new("Note deleted successfully")))
}

/// POST /api/notes/{id}/share - Grant another user read access. Owner only.
///
/// The recipient must exist, and a second share of the same pair is a 400;
/// the ledger keeps at most one active relation per (note, user).
async fn share_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(note_id): Path<Uuid>,
    Json(request): Json<ShareNoteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let receiver_id = request.receiver_id.ok_or_else(|| {
        ApiError::Validation(vec![notes_core::FieldError::new(
            "receiverId",
            "receiverId is required",
        )])
    })?;

    let store = state.store();

    if !store.user_exists(receiver_id).await? {
        return Err(ApiError::NotFound(
            "User with specified id not found".to_string(),
        ));
    }

    store
        .get_note_owned(note_id, user.user_id)
        .await?
        .ok_or_else(note_not_found)?;

    store
        .grant_access(&NewNoteAccess::new(note_id, receiver_id))
        .await?;

    tracing::info!(
        note_id = %note_id,
        owner_id = %user.user_id,
        receiver_id = %receiver_id,
        "Note shared"
    );

    Ok(Json(MessageResponse::new("Note shared successfully")))
}

/// DELETE /api/notes/{id}/share/{user_id} - Revoke a share. Owner only.
///
/// The owner's own relation cannot be revoked.
async fn unshare_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((note_id, recipient_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    let store = state.store();

    store
        .get_note_owned(note_id, user.user_id)
        .await?
        .ok_or_else(note_not_found)?;

    if recipient_id == user.user_id {
        return Err(ApiError::BadRequest(
            "Cannot revoke the owner's access".to_string(),
        ));
    }

    let revoked = store.revoke_access(note_id, recipient_id).await?;
    if !revoked {
        return Err(ApiError::NotFound(
            "No active share for the specified user".to_string(),
        ));
    }

    tracing::info!(
        note_id = %note_id,
        owner_id = %user.user_id,
        recipient_id = %recipient_id,
        "Note unshared"
    );

    Ok(Json(MessageResponse::new("Note unshared successfully")))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/notes/{id}/share", post(share_note))
        .route("/api/notes/{id}/share/{user_id}", delete(unshare_note))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_note_request_deserialize() {
        let json = r#"{"title": "T", "content": "C"}"#;
        let request: CreateNoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title.as_deref(), Some("T"));
        assert_eq!(request.content.as_deref(), Some("C"));
    }

    #[test]
    fn test_update_note_request_fields_optional() {
        let title_only: UpdateNoteRequest = serde_json::from_str(r#"{"title": "T2"}"#).unwrap();
        assert_eq!(title_only.title.as_deref(), Some("T2"));
        assert!(title_only.content.is_none());

        let empty: UpdateNoteRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.title.is_none());
        assert!(empty.content.is_none());
    }

    #[test]
    fn test_share_request_uses_receiver_id() {
        let json = format!(r#"{{"receiverId": "{}"}}"#, Uuid::nil());
        let request: ShareNoteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.receiver_id, Some(Uuid::nil()));

        // The snake_case name is not accepted on the wire
        let bad = format!(r#"{{"receiver_id": "{}"}}"#, Uuid::nil());
        let request: ShareNoteRequest = serde_json::from_str(&bad).unwrap();
        assert!(request.receiver_id.is_none());
    }

    #[test]
    fn test_not_found_does_not_leak_ownership() {
        let err = note_not_found();
        let msg = err.to_string();
        assert!(msg.contains("Note not found"));
        assert!(!msg.contains("owner"));
    }
}
