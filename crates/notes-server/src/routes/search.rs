//! Full-text search over the caller's accessible notes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use notes_core::{FieldError, Note, PageParams};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /api/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query; required.
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,
}

/// GET /api/search - Search title and content, restricted to the caller's
/// accessible set.
///
/// Notes outside the ledger's accessible-id set are invisible to the query
/// itself, not filtered afterwards. No match is an empty array, not an
/// error.
async fn search_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Note>>> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new("q", "Search query is required")])
        })?
        .to_string();

    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };

    let store = state.store();
    let ids = store.list_accessible_note_ids(user.user_id).await?;
    let rows = store
        .search_notes(&ids, &query, page.limit(), page.offset())
        .await?;

    tracing::debug!(
        user_id = %user.user_id,
        hits = rows.len(),
        "Search completed"
    );

    Ok(Json(rows.into_iter().map(|row| row.into_note()).collect()))
}

/// Build search routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_notes))
}
