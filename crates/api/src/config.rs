use std::str::FromStr;
use std::time::Duration;

use streamvault_db::retry::RetryPolicy;

use crate::auth::jwt::JwtConfig;
use crate::mail::EmailConfig;

/// A required variable is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and `JWT_SECRET` has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    /// Deadlock retry bounds for multi-statement writes.
    pub db_retry: RetryPolicy,
    /// Frontend origin used to build password-reset links.
    pub public_base_url: String,
    /// `None` when `SMTP_HOST` is unset; reset links are then only logged.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `DATABASE_URL`           | required                |
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `CACHE_ENABLED`          | `true`                  |
    /// | `CACHE_TTL_SECS`         | `300`                   |
    /// | `DB_RETRY_MAX_ATTEMPTS`  | `3`                     |
    /// | `DB_RETRY_BASE_DELAY_MS` | `100`                   |
    /// | `PUBLIC_BASE_URL`        | `http://localhost:5173` |
    ///
    /// JWT and SMTP variables are documented on [`JwtConfig::from_env`] and
    /// [`EmailConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000)?;

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30)?;
        let cache_enabled: bool = env_or("CACHE_ENABLED", true)?;
        let cache_ttl_secs: u64 = env_or("CACHE_TTL_SECS", 300)?;

        let max_attempts: u32 = env_or("DB_RETRY_MAX_ATTEMPTS", 3)?;
        let base_delay_ms: u64 = env_or("DB_RETRY_BASE_DELAY_MS", 100)?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env()?,
            cache_enabled,
            cache_ttl_secs,
            db_retry: RetryPolicy::new(max_attempts, Duration::from_millis(base_delay_ms)),
            public_base_url,
            email: EmailConfig::from_env(),
        })
    }
}

/// Read `name` and parse it, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
