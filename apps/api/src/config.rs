use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Trailing-edge delay before a toggled profile is persisted.
    pub profile_save_debounce: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profile_save_debounce: Duration::from_millis(parse_env(
                "PROFILE_SAVE_DEBOUNCE_MS",
                1000,
            )?),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u16 = parse_env("JOBMATCH_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("JOBMATCH_TEST_DEBOUNCE", "250");
        let value: u64 = parse_env("JOBMATCH_TEST_DEBOUNCE", 1000).unwrap();
        assert_eq!(value, 250);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBMATCH_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("JOBMATCH_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("JOBMATCH_TEST_BAD_PORT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("JOBMATCH_TEST_MISSING_URL").unwrap_err();
        assert!(err.to_string().contains("JOBMATCH_TEST_MISSING_URL"));
    }
}
