//! Route definitions for the HTTP API.

pub mod auth;
pub mod health;
pub mod notes;
pub mod search;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Plain `{"message"}` response body shared by several endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(notes::routes())
        .merge(search::routes())
        .with_state(state)
}
