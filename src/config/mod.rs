use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::generator::DEFAULT_ALIAS_LENGTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub env: Environment,
    pub database: DatabaseConfig,
    pub http_server: ServerConfig,
    pub alias: AliasConfig,
}

/// Deployment environment; selects the logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Length of generated aliases
    pub length: usize,
    /// How many generated aliases to try before giving up on a save
    pub max_attempts: u32,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8082,
            timeout_secs: 4,
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_ALIAS_LENGTH,
            max_attempts: 5,
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => bail!("unknown ENV '{other}', supported values: local, dev, prod"),
        }
    }
}

impl FromStr for DatabaseBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseBackend::Sqlite),
            "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
            "memory" => Ok(DatabaseBackend::Memory),
            other => {
                bail!("unknown DATABASE_BACKEND '{other}', supported values: sqlite, postgres, memory")
            }
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let env = var("ENV", "local").parse::<Environment>()?;
        let backend = var("DATABASE_BACKEND", "sqlite").parse::<DatabaseBackend>()?;
        let database_url = var("DATABASE_URL", "sqlite://./storage.db");
        let max_connections = var("DATABASE_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let server_defaults = ServerConfig::default();
        let host = var("HTTP_HOST", &server_defaults.host);
        let port = var("HTTP_PORT", &server_defaults.port.to_string())
            .parse::<u16>()
            .context("HTTP_PORT must be a valid port number")?;
        let timeout_secs = var("HTTP_TIMEOUT_SECS", &server_defaults.timeout_secs.to_string())
            .parse::<u64>()
            .context("HTTP_TIMEOUT_SECS must be a number of seconds")?;

        let alias_defaults = AliasConfig::default();
        let alias_length = var("ALIAS_LENGTH", &alias_defaults.length.to_string())
            .parse::<usize>()
            .context("ALIAS_LENGTH must be a positive integer")?;
        if alias_length == 0 {
            bail!("ALIAS_LENGTH must be greater than zero");
        }
        let max_attempts = var("ALIAS_MAX_ATTEMPTS", &alias_defaults.max_attempts.to_string())
            .parse::<u32>()
            .context("ALIAS_MAX_ATTEMPTS must be a positive integer")?;
        if max_attempts == 0 {
            bail!("ALIAS_MAX_ATTEMPTS must be greater than zero");
        }

        Ok(Config {
            env,
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections,
            },
            http_server: ServerConfig {
                host,
                port,
                timeout_secs,
            },
            alias: AliasConfig {
                length: alias_length,
                max_attempts,
            },
        })
    }
}
