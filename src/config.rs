//! Process configuration from environment variables (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/tpo_portal";
pub const DEFAULT_SCHEMA: &str = "portal";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// `DATABASE_URL` as given; `None` when unset.
    pub database_url: Option<String>,
    /// `PORTAL_SCHEMA`: PostgreSQL schema holding one table per collection.
    pub schema: String,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `HOST`
    pub host: String,
    /// `PORT`
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            schema: DEFAULT_SCHEMA.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let schema = get("PORTAL_SCHEMA").unwrap_or(defaults.schema);
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "PORTAL_SCHEMA",
                reason: format!("'{}' is not a valid identifier", schema),
            });
        }
        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{}': {}", v, e),
            })?,
            None => defaults.port,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: format!("'{}': {}", v, e),
            })?,
            None => defaults.max_connections,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            schema,
            max_connections,
            host: get("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// URL used to connect: `DATABASE_URL`, or the local default.
    pub fn effective_database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_identifier(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("static pattern"))
        .is_match(s)
}
