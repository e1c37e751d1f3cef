//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/productos";
pub const DEFAULT_PORT: u16 = 4000;

/// Runtime settings for the API process.
///
/// | Env Var              | Default                          |
/// |----------------------|----------------------------------|
/// | `DATABASE_URL`       | `postgres://localhost/productos` |
/// | `FRONTEND_URL`       | unset (any origin)               |
/// | `HOST`               | `0.0.0.0`                        |
/// | `PORT`               | `4000`                           |
/// | `DB_MAX_CONNECTIONS` | `5`                              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    /// Only origin allowed by CORS. `None` allows any origin.
    pub frontend_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            frontend_url: None,
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            db_max_connections: 5,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or blank keys take the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            frontend_url: get("FRONTEND_URL"),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"), defaults.port)?,
            db_max_connections: parse_var(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value }),
    }
}
