//! Authentication routes: signup, login, refresh-token.
//!
//! Login hands out an access/refresh token pair and additionally sets the
//! refresh token as an httpOnly + secure cookie; the refresh endpoint
//! accepts the token from either the request body or that cookie.

use axum::{Json, Router, extract::State, routing::post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use notes_core::Validator;
use notes_store::NewUser;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Name of the refresh-token cookie set on login.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Missing fields deserialize to `None` so the handler can answer with
/// field-level validation errors instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/auth/signup
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let username = request.username.as_deref().unwrap_or("");
    let password = request.password.as_deref().unwrap_or("");
    let email = request.email.as_deref().unwrap_or("");

    let mut v = Validator::new();
    v.require("username", username, "Username is required")
        .require("password", password, "Password is required")
        .require_email("email", email, "Email is required");
    v.finish().map_err(ApiError::Validation)?;

    let password_hash = auth::hash_password(password)?;

    let user = state
        .store()
        .insert_user(&NewUser::new(
            username.to_string(),
            email.to_string(),
            password_hash,
        ))
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

    Ok(Json(MessageResponse::new("User created successfully")))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let username = request.username.as_deref().unwrap_or("");
    let password = request.password.as_deref().unwrap_or("");

    let mut v = Validator::new();
    v.require("username", username, "Username is required")
        .require("password", password, "Password is required");
    v.finish().map_err(ApiError::Validation)?;

    let user = state
        .store()
        .get_user_by_username(username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = auth::verify_password(password, &user.password_hash)?;
    if !valid {
        return Err(invalid_credentials());
    }

    let config = state.config();
    let access_token =
        auth::issue_access_token(user.id, &config.jwt_secret, config.access_token_ttl_minutes)?;
    let refresh_token = auth::issue_refresh_token(
        user.id,
        &config.refresh_token_secret,
        config.refresh_token_ttl_days,
    )?;

    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, refresh_token.clone()))
        .http_only(true)
        .secure(true)
        .path("/")
        .build();

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            access_token,
            refresh_token,
        }),
    ))
}

/// POST /api/auth/refresh-token
async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<Json<RefreshTokenResponse>> {
    let token = body
        .and_then(|Json(b)| b.refresh_token)
        .or_else(|| {
            jar.get(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })
        .ok_or_else(|| ApiError::Unauthorized("Refresh token is required".to_string()))?;

    let config = state.config();
    let claims = auth::verify_token(&token, &config.refresh_token_secret)
        .map_err(|_| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    let access_token =
        auth::issue_access_token(claims.sub, &config.jwt_secret, config.access_token_ttl_minutes)?;

    tracing::debug!(user_id = %claims.sub, "Access token refreshed");

    Ok(Json(RefreshTokenResponse { access_token }))
}

/// The one answer for every failed login. Whether the username was unknown
/// or the password wrong must not be distinguishable from outside.
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Wrong username or password".to_string())
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_deserialize() {
        let json = r#"{"username": "alice", "password": "secret", "email": "alice@example.com"}"#;
        let request: SignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert_eq!(request.password.as_deref(), Some("secret"));
        assert_eq!(request.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_signup_request_tolerates_missing_fields() {
        let request: SignupRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_none());
        assert!(request.password.is_none());
        assert!(request.email.is_none());
    }

    #[test]
    fn test_login_response_wire_names() {
        let response = LoginResponse {
            access_token: "a.b.c".to_string(),
            refresh_token: "d.e.f".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "a.b.c");
        assert_eq!(json["refreshToken"], "d.e.f");
        assert!(json.get("access_token").is_none());
    }

    #[test]
    fn test_refresh_request_token_optional() {
        let with: RefreshTokenRequest = serde_json::from_str(r#"{"refreshToken": "t"}"#).unwrap();
        assert_eq!(with.refresh_token.as_deref(), Some("t"));

        let without: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(without.refresh_token.is_none());
    }

    #[test]
    fn test_invalid_credentials_is_uniform() {
        let a = invalid_credentials();
        let b = invalid_credentials();
        assert_eq!(a.to_string(), b.to_string());
    }
}
