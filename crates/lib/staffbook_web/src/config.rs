//! Application configuration.

use thiserror::Error;

/// Raised when required configuration is missing at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `SESSION_SECRET` is unset or empty. There is no fallback secret;
    /// startup fails instead.
    #[error("SESSION_SECRET must be set to a non-empty value")]
    MissingSessionSecret,
}

/// Configuration for the web application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Secret the session cookie is sealed with. Required, non-empty.
    pub session_secret: String,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable         | Default                                   |
    /// |------------------|-------------------------------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3000`                          |
    /// | `DATABASE_URL`   | `postgres://localhost:5432/staffbook`     |
    /// | `SESSION_SECRET` | none — startup fails when unset or empty  |
    /// | `APP_ENV`        | `development` (`production` sets `Secure` on cookies) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/staffbook".into()),
            std::env::var("SESSION_SECRET").unwrap_or_default(),
            std::env::var("APP_ENV").is_ok_and(|env| env == "production"),
        )
    }

    /// Validate and assemble a config from already-resolved values.
    pub fn build(
        bind_addr: String,
        database_url: String,
        session_secret: String,
        secure_cookies: bool,
    ) -> Result<Self, ConfigError> {
        if session_secret.trim().is_empty() {
            return Err(ConfigError::MissingSessionSecret);
        }
        Ok(Self {
            bind_addr,
            database_url,
            session_secret,
            secure_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_with_secret(secret: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::build(
            "127.0.0.1:0".into(),
            "postgres://localhost:5432/staffbook".into(),
            secret.into(),
            false,
        )
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(build_with_secret("").is_err());
    }

    #[test]
    fn whitespace_secret_is_rejected() {
        assert!(build_with_secret("   ").is_err());
    }

    #[test]
    fn non_empty_secret_is_accepted() {
        let config = build_with_secret("s3cret").expect("config");
        assert_eq!(config.session_secret, "s3cret");
        assert!(!config.secure_cookies);
    }
}
