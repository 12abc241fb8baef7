//! Process configuration parsed from environment variables.
//!
//! `main` calls `dotenvy::dotenv()` first, so a local `.env` file can supply
//! any of these during development.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("DATABASE_URL").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
            std::env::var("DB_MAX_CONNECTIONS").ok().as_deref(),
        )
    }

    pub(crate) fn from_values(
        database_url: Option<&str>,
        port: Option<&str>,
        db_max_connections: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let database_url = database_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?
            .to_owned();
        let port = parse_or_default("PORT", port, DEFAULT_PORT)?;
        let db_max_connections = parse_or_default("DB_MAX_CONNECTIONS", db_max_connections, DEFAULT_DB_MAX_CONNECTIONS)?;

        if db_max_connections == 0 {
            return Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", value: "0".into() });
        }

        Ok(Self { database_url, port, db_max_connections })
    }
}

fn parse_or_default<T: std::str::FromStr>(var: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: value.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
