//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, MIN_JWT_SECRET_LENGTH};
use crate::errors::{AppError, AppResult};

/// Secret used by debug builds when `JWT_SECRET` is missing.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    /// Returns an internal error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH` bytes.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
        })
    }

    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// `DATABASE_URL` falls back to `DATABASE_DSN`, then to a development
    /// default. A missing `JWT_SECRET` is tolerated only in debug builds.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("DATABASE_DSN"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self::new(database_url, jwt_secret)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}
