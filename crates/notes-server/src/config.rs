//! Server configuration from environment variables.

use std::env;

/// Server configuration.
///
/// Database settings live in `notes_store::StoreConfig`; this struct only
/// carries what the HTTP layer needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Signing key for access tokens.
    pub jwt_secret: String,
    /// Signing key for refresh tokens.
    pub refresh_token_secret: String,
    /// Access token lifetime in minutes.
    pub access_token_ttl_minutes: u64,
    /// Refresh token lifetime in days.
    pub refresh_token_ttl_days: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: Access-token signing key
    /// - `REFRESH_TOKEN_SECRET`: Refresh-token signing key
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `ACCESS_TOKEN_TTL_MINUTES`: Access token lifetime (default: 30)
    /// - `REFRESH_TOKEN_TTL_DAYS`: Refresh token lifetime (default: 7)
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let refresh_token_secret = env::var("REFRESH_TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("REFRESH_TOKEN_SECRET".to_string()))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let access_token_ttl_minutes = env::var("ACCESS_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let refresh_token_ttl_days = env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7);

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            jwt_secret,
            refresh_token_secret,
            access_token_ttl_minutes,
            refresh_token_ttl_days,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // SAFETY: This test is not run in parallel with other tests that
        // read these variables.
        unsafe {
            env::set_var("JWT_SECRET", "test-secret");
            env::set_var("REFRESH_TOKEN_SECRET", "test-refresh-secret");
        }

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.access_token_ttl_minutes, 30);
        assert_eq!(config.refresh_token_ttl_days, 7);

        // SAFETY: See above.
        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("REFRESH_TOKEN_SECRET");
        }
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        // JWT_SECRET is unset unless test_default_values is mid-flight; use a
        // scoped check on the error type only when the variable is absent.
        if env::var("JWT_SECRET").is_err() {
            let result = ServerConfig::from_env();
            assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
        }
    }
}
