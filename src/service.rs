use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AliasConfig;
use crate::generator::{AliasGenerator, GenerateAlias};
use crate::storage::{Storage, StorageError};

const MAX_ALIAS_LENGTH: usize = 64;

/// Path segments that cannot be used as aliases because a route already owns them.
const RESERVED_ALIASES: &[&str] = &["url"];

/// Which side of the mapping collided on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Url,
    Alias,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Url => f.write_str("url"),
            Collision::Alias => f.write_str("alias"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("url not found")]
    NotFound,
    #[error("{0} already exists")]
    AlreadyExists(Collision),
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AliasExists => ServiceError::AlreadyExists(Collision::Alias),
            StorageError::UrlExists => ServiceError::AlreadyExists(Collision::Url),
            StorageError::NotFound => ServiceError::NotFound,
            StorageError::Other(e) => ServiceError::Internal(e),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUrl {
    pub id: i64,
    pub alias: String,
}

/// Orchestrates alias generation and the mapping store.
pub struct Shortener {
    storage: Arc<dyn Storage>,
    generator: Arc<dyn GenerateAlias>,
    policy: AliasConfig,
}

impl Shortener {
    pub fn new(storage: Arc<dyn Storage>, policy: AliasConfig) -> Self {
        Self::with_generator(storage, policy, Arc::new(AliasGenerator::new()))
    }

    pub fn with_generator(
        storage: Arc<dyn Storage>,
        policy: AliasConfig,
        generator: Arc<dyn GenerateAlias>,
    ) -> Self {
        Self {
            storage,
            generator,
            policy,
        }
    }

    /// Store `url` under `requested_alias`, or under a generated alias when none is given.
    ///
    /// Collisions on an explicitly requested alias are reported as
    /// [`ServiceError::AlreadyExists`]; collisions on a generated alias are retried
    /// up to the configured number of attempts.
    pub async fn save(&self, url: &str, requested_alias: Option<&str>) -> ServiceResult<SavedUrl> {
        validate_url(url)?;

        if let Some(alias) = requested_alias.filter(|a| !a.is_empty()) {
            validate_alias(alias)?;
            let id = self.storage.save_url(url, alias).await?;
            return Ok(SavedUrl {
                id,
                alias: alias.to_string(),
            });
        }

        for attempt in 1..=self.policy.max_attempts {
            let alias = self.generator.generate(self.policy.length);
            if is_reserved(&alias) {
                debug!(alias = %alias, attempt, "generated alias is reserved, retrying");
                continue;
            }
            match self.storage.save_url(url, &alias).await {
                Ok(id) => return Ok(SavedUrl { id, alias }),
                Err(StorageError::AliasExists) => {
                    debug!(alias = %alias, attempt, "generated alias collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            length = self.policy.length,
            "could not find a free alias"
        );
        Err(ServiceError::Internal(anyhow::anyhow!(
            "no free alias after {} attempts",
            self.policy.max_attempts
        )))
    }

    pub async fn resolve(&self, alias: &str) -> ServiceResult<String> {
        if alias.is_empty() {
            return Err(ServiceError::InvalidInput("alias is empty".to_string()));
        }
        Ok(self.storage.get_url(alias).await?)
    }

    pub async fn delete(&self, alias: &str) -> ServiceResult<()> {
        if alias.is_empty() {
            return Err(ServiceError::InvalidInput(
                "alias is required for deletion".to_string(),
            ));
        }
        Ok(self.storage.delete_url(alias).await?)
    }
}

/// A URL is accepted when it parses as an absolute URL with a host.
///
/// The raw string is what gets stored and sent back in `Location`, so it must
/// not contain whitespace or control characters that the parser would strip.
pub fn validate_url(raw: &str) -> ServiceResult<()> {
    if raw.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "field URL is a required field".to_string(),
        ));
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ServiceError::InvalidInput(
            "field URL is not a valid URL".to_string(),
        ));
    }
    match url::Url::parse(raw) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(ServiceError::InvalidInput(
            "field URL is not a valid URL".to_string(),
        )),
    }
}

fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

pub fn validate_alias(alias: &str) -> ServiceResult<()> {
    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(ServiceError::InvalidInput(format!(
            "alias must be at most {MAX_ALIAS_LENGTH} characters"
        )));
    }
    if !alias
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(ServiceError::InvalidInput(
            "alias may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    if is_reserved(alias) {
        return Err(ServiceError::InvalidInput(format!("alias '{alias}' is reserved")));
    }
    Ok(())
}
