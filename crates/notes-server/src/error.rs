//! API error types with JSON responses.
//!
//! Response bodies come in two shapes: validation failures return
//! `{"errors": [{"field", "message"}, ..]}`, everything else returns
//! `{"message"}`. Server-side failures are logged with their cause and
//! answered with a generic message only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_core::FieldError;
use notes_store::StoreError;
use serde::Serialize;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field-level validation failures (400).
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404). Also covers "exists but not yours".
    #[error("not found: {0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                // Conflicts surface as 400, matching the API contract.
                StoreError::UsernameTaken(_) => StatusCode::BAD_REQUEST,
                StoreError::AlreadyShared { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The message exposed to the client.
    ///
    /// Internal causes never appear here.
    fn public_message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation failed".to_string(),
            Self::BadRequest(m) | Self::NotFound(m) | Self::Unauthorized(m) => m.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Store(StoreError::UsernameTaken(_)) => {
                "Username is already taken".to_string()
            }
            Self::Store(StoreError::AlreadyShared { .. }) => {
                "Note is already shared with the specified user".to_string()
            }
            Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

/// JSON body for non-validation errors.
#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

/// JSON body for validation errors.
#[derive(Debug, Serialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            other => {
                let status = other.status_code();
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                }

                (
                    status,
                    Json(MessageBody {
                        message: other.public_message(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflicts_map_to_400() {
        let taken = ApiError::Store(StoreError::UsernameTaken("alice".into()));
        assert_eq!(taken.status_code(), StatusCode::BAD_REQUEST);

        let shared = ApiError::Store(StoreError::AlreadyShared {
            note_id: Uuid::nil(),
            user_id: Uuid::nil(),
        });
        assert_eq!(shared.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::Internal("secret detail: db password".into());
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_validation_body_shape() {
        let err = ApiError::Validation(vec![FieldError::new("username", "Username is required")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let errors = value.get("errors").unwrap().as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["field"], "username");
    }

    #[tokio::test]
    async fn test_message_body_shape() {
        let err = ApiError::NotFound("Note not found for the authenticated user".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value["message"],
            "Note not found for the authenticated user"
        );
    }
}
