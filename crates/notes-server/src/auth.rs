//! Authentication module: JWT token management and password hashing.
//!
//! Access and refresh tokens share one claims shape (`sub` = user id) but
//! are signed with different secrets, so one can never stand in for the
//! other. The [`AuthenticatedUser`] extractor is the authorization gate:
//! every note handler takes it as an argument, which means a request is
//! rejected with 401 before the handler body runs if the bearer token is
//! missing, invalid, expired, or refers to a user that no longer exists.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims, used for both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject).
    pub sub: Uuid,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// Create a short-lived access token for a user.
pub fn issue_access_token(
    user_id: Uuid,
    secret: &str,
    ttl_minutes: u64,
) -> Result<String, ApiError> {
    issue_token(user_id, secret, chrono::Duration::minutes(ttl_minutes as i64))
}

/// Create a long-lived refresh token for a user.
///
/// Refresh tokens carry the subject claim, so refreshing does not need a
/// separate lookup to recover the user.
pub fn issue_refresh_token(user_id: Uuid, secret: &str, ttl_days: u64) -> Result<String, ApiError> {
    issue_token(user_id, secret, chrono::Duration::days(ttl_days as i64))
}

fn issue_token(user_id: Uuid, secret: &str, ttl: chrono::Duration) -> Result<String, ApiError> {
    let now = chrono::Utc::now();

    let claims = Claims {
        sub: user_id,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
}

/// Validate a JWT token and return its claims.
///
/// Expired and otherwise-invalid tokens both map to 401; the message tells
/// them apart, the status does not.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ApiError::Unauthorized("Token has expired".to_string()),
        _ => ApiError::Unauthorized("Invalid token".to_string()),
    })?;

    Ok(token_data.claims)
}

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(password_hash.to_string())
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The acting user, resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID.
    pub user_id: Uuid,
    /// Username, for logging.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".to_string())
        })?;

        let claims = verify_token(token.trim(), &state.config().jwt_secret)?;

        // The subject must still exist; a deleted account keeps a valid
        // signature but loses access.
        let user = state
            .store()
            .get_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!hash.contains("hunter2"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let secret = "test_secret_key_12345";
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, secret, 30).unwrap();
        let claims = verify_token(&token, secret).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_carries_subject() {
        let user_id = Uuid::new_v4();
        let token = issue_refresh_token(user_id, "refresh_secret", 7).unwrap();
        let claims = verify_token(&token, "refresh_secret").unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let token = issue_access_token(Uuid::new_v4(), "secret1", 30).unwrap();
        let result = verify_token(&token, "secret2");
        assert!(result.is_err());
    }

    #[test]
    fn test_access_and_refresh_secrets_are_not_interchangeable() {
        let user_id = Uuid::new_v4();
        let refresh = issue_refresh_token(user_id, "refresh_secret", 7).unwrap();
        assert!(verify_token(&refresh, "access_secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test_secret";
        // Issued two hours in the past, well beyond the default leeway.
        let token = issue_token(Uuid::new_v4(), secret, chrono::Duration::minutes(-120)).unwrap();

        let err = verify_token(&token, secret).unwrap_err();
        match err {
            ApiError::Unauthorized(msg) => assert!(msg.contains("expired")),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }
}
