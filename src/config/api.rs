//! Auth API configuration from environment variables.

use crate::errors::{Error, Result};

/// Settings for the companion auth API, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
    /// Symmetric key used to sign session tokens
    pub jwt_secret: String,
    /// Whether the session cookie is marked `Secure` (production deployments)
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads the API configuration from the environment.
    ///
    /// `JWT_SECRET` is required; `API_BIND` defaults to `127.0.0.1:8080` and
    /// `COOKIE_SECURE` defaults to off.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| Error::Config {
            message: "JWT_SECRET must be set".to_string(),
        })?;

        Ok(Self {
            bind_addr: std::env::var("API_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            jwt_secret,
            secure_cookies: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
