//! Backend over a networked key-value store

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use cachify_core::{
    CachifyError, DebugTrace, RemoteStore, Result, decode, encode, prefix_pattern,
    validate_duration, validate_key,
};

/// Convert a duration to the store's whole-second expiry, rounding up
///
/// The store rejects a zero expiry, so anything under a second becomes one
/// second.
pub(crate) fn ttl_secs(duration: Duration) -> u64 {
    let secs = duration.as_millis().div_ceil(1000).max(1);
    u64::try_from(secs).unwrap_or(u64::MAX)
}

/// Cache backend that talks to a [`RemoteStore`]
///
/// Values are stored as JSON text with the store's native expiry. The
/// connection is borrowed: dropping the backend leaves it open. Clones
/// share the connection and the debug switch.
#[derive(Clone)]
pub struct RemoteBackend {
    store: Arc<dyn RemoteStore>,
    trace: DebugTrace,
}

impl RemoteBackend {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            trace: DebugTrace::default(),
        }
    }

    /// The connection this backend talks through
    pub fn connection(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Store `value` under `key` for `duration`, replacing any previous entry
    pub async fn set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        validate_duration(duration)?;

        let text = encode(key, value)?;
        self.store.set_ex(key, text, ttl_secs(duration)).await?;
        self.trace.set_key(key);
        Ok(())
    }

    /// Get the value stored under `key`, `None` if missing or expired
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        self.store
            .get(key)
            .await?
            .map(|text| decode(key, &text))
            .transpose()
    }

    /// Remove `key`; absent keys are a no-op
    pub async fn dispose(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.store.del(&[key.to_string()]).await?;
        self.trace.disposed(key);
        Ok(())
    }

    /// Remove every key that starts with `prefix`
    pub async fn dispose_prefix(&self, prefix: &str) -> Result<()> {
        validate_key(prefix)?;

        let keys = self.store.keys(&prefix_pattern(prefix)).await?;
        let count = if keys.is_empty() {
            0
        } else {
            self.store.del(&keys).await?
        };
        self.trace.disposed_prefix(prefix, count);
        Ok(())
    }

    /// Return the cached value for `key`, or produce, cache and return it
    ///
    /// Same contract as [`LocalBackend::cachify`](crate::LocalBackend::cachify);
    /// store failures on the read or the write are returned as `E`.
    pub async fn cachify<T, F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        duration: Duration,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<CachifyError> + Display,
    {
        validate_key(key)?;
        validate_duration(duration)?;

        if let Some(cached) = self.get(key).await? {
            self.trace.hit(key);
            return Ok(cached);
        }
        self.trace.miss(key);

        let fresh = match producer().await {
            Ok(value) => value,
            Err(e) => {
                warn!(target: "cachify", key = %key, error = %e, "Error fetching fresh value for key {}", key);
                return Err(e);
            }
        };
        self.set(key, &fresh, duration).await?;
        Ok(fresh)
    }

    pub fn set_debug(&self, flag: bool) {
        self.trace.set(flag);
    }

    pub fn is_debug(&self) -> bool {
        self.trace.is_enabled()
    }

    /// Read a value written by [`json_set`](Self::json_set)
    pub async fn json_get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get::<String>(key).await? {
            Some(text) => decode(key, &text).map(Some),
            None => Ok(None),
        }
    }

    /// Store `value` as JSON text
    pub async fn json_set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        validate_duration(duration)?;

        let text = encode(key, value)?;
        self.set(key, &text, duration).await
    }
}
