//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::logging::pii::redact_email;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

pub const DEFAULT_SEED_EMAIL: &str = "user@email.com";
pub const DEFAULT_SEED_PASSWORD: &str = "password";

/// Upper bound accepted for `AUTHGATE_TOKEN_TTL_SECS` (one year).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Everything the binary needs to start, read once at startup.
#[derive(Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub jwt_secret: String,
    pub token_ttl: Duration,

    // Demo account inserted into the in-memory store
    pub seed_email: String,
    pub seed_password: String,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("AUTHGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("AUTHGATE_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "AUTHGATE_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = env::var("AUTHGATE_JWT_SECRET")
            .map_err(|_| AppError::config("AUTHGATE_JWT_SECRET must be set".to_string()))?;
        if jwt_secret.is_empty() {
            return Err(AppError::config(
                "AUTHGATE_JWT_SECRET must not be empty".to_string(),
            ));
        }

        let token_ttl = match env::var("AUTHGATE_TOKEN_TTL_SECS") {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        let seed_email =
            env::var("AUTHGATE_SEED_EMAIL").unwrap_or_else(|_| DEFAULT_SEED_EMAIL.to_string());
        let seed_password = env::var("AUTHGATE_SEED_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_SEED_PASSWORD.to_string());

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl,
            seed_email,
            seed_password,
        })
    }

    /// Security settings handed to the token codec
    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_token_ttl(self.token_ttl)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_ttl", &self.token_ttl)
            .field("seed_email", &redact_email(&self.seed_email))
            .finish_non_exhaustive()
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > MAX_TOKEN_TTL.as_secs() => Err(AppError::config(format!(
            "AUTHGATE_TOKEN_TTL_SECS must be at most {} seconds, got '{raw}'",
            MAX_TOKEN_TTL.as_secs()
        ))),
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::config(format!(
            "AUTHGATE_TOKEN_TTL_SECS must be a positive number of seconds, got '{raw}'"
        ))),
    }
}
