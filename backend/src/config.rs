//! Server configuration, read once at startup from the environment.
//!
//! A `.env` file in the working directory is loaded first (see `main.rs`), so
//! every setting can live there during development. Unset variables take the
//! defaults below; a variable that is set but unparseable aborts startup.

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE: &str = "registry.sqlite";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite file, or `:memory:`.
    pub database_path: String,
    pub max_upload_bytes: usize,
    pub json_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            host: lookup("REGISTRY_HOST").unwrap_or(defaults.host),
            port: parse_number(&lookup, "REGISTRY_PORT", defaults.port)?,
            database_path: lookup("REGISTRY_DATABASE").unwrap_or(defaults.database_path),
            max_upload_bytes: parse_number(
                &lookup,
                "REGISTRY_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,
            json_limit_bytes: parse_number(
                &lookup,
                "REGISTRY_JSON_LIMIT_BYTES",
                defaults.json_limit_bytes,
            )?,
        })
    }
}

fn parse_number<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
