//! Configuration for the Redis connection

use redis::aio::ConnectionManager;

use cachify_core::{CachifyError, Result};

/// Where to reach Redis
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

impl RedisConfig {
    /// Create new config with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Read `REDIS_URL`, falling back to the local default
    pub fn from_env() -> Self {
        std::env::var("REDIS_URL")
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Open a managed connection
    ///
    /// The returned handle belongs to the caller; hand clones of it to
    /// [`RedisStore::new`](super::RedisStore::new).
    pub async fn connect(&self) -> Result<ConnectionManager> {
        let client = redis::Client::open(self.url.as_str())
            .map_err(|e| CachifyError::Configuration(e.to_string()))?;

        client
            .get_connection_manager()
            .await
            .map_err(|e| CachifyError::Backend(e.to_string()))
    }
}
