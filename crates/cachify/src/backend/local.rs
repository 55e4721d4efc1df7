//! Backend over the in-process expiring map

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use cachify_core::{
    CacheStats, CachifyError, DebugTrace, Result, decode, decode_value, encode, encode_value,
    validate_duration, validate_key,
};
use cachify_storage::{MemoryConfig, MemoryStore};

/// Cache backend that keeps entries in process memory
///
/// Every operation completes synchronously except [`cachify`](Self::cachify),
/// which awaits its producer. Values are held as JSON trees, so a read
/// returns the structured value without a text round trip.
#[derive(Default)]
pub struct LocalBackend {
    store: MemoryStore,
    trace: DebugTrace,
}

impl LocalBackend {
    /// Create a backend with an unbounded store
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::unlimited())
    }

    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            store: MemoryStore::new(config),
            trace: DebugTrace::default(),
        }
    }

    /// Store `value` under `key` for `duration`, replacing any previous entry
    pub fn set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        validate_duration(duration)?;

        let value = encode_value(key, value)?;
        self.store.put(key, value, duration);
        self.trace.set_key(key);
        Ok(())
    }

    /// Get the value stored under `key`, `None` if missing or expired
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        self.store
            .get(key)
            .map(|value| decode_value(key, value))
            .transpose()
    }

    /// Remove `key`; absent keys are a no-op
    pub fn dispose(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.store.remove(key);
        self.trace.disposed(key);
        Ok(())
    }

    /// Remove every key that starts with `prefix`
    pub fn dispose_prefix(&self, prefix: &str) -> Result<()> {
        validate_key(prefix)?;

        let mut count = 0;
        for key in self.store.keys() {
            if key.starts_with(prefix) && self.store.remove(&key) {
                count += 1;
            }
        }
        self.trace.disposed_prefix(prefix, count);
        Ok(())
    }

    /// Return the cached value for `key`, or produce, cache and return it
    ///
    /// On a miss `producer` runs once; its value is stored for `duration`.
    /// A producer error is returned unchanged and nothing is cached, so the
    /// next call runs the producer again. Concurrent misses on one key each
    /// run their own producer and the last write wins.
    ///
    /// A producer must be callable:
    ///
    /// ```compile_fail
    /// # use cachify::{CachifyError, LocalBackend};
    /// # use std::time::Duration;
    /// # async fn demo() {
    /// let cache = LocalBackend::new();
    /// let _ = cache
    ///     .cachify::<String, _, _, CachifyError>("k", "not-a-function", Duration::from_millis(100))
    ///     .await;
    /// # }
    /// ```
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

        if let Some(cached) = self.get(key)? {
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
        self.set(key, &fresh, duration)?;
        Ok(fresh)
    }

    pub fn set_debug(&self, flag: bool) {
        self.trace.set(flag);
    }

    pub fn is_debug(&self) -> bool {
        self.trace.is_enabled()
    }

    /// Read a value written by [`json_set`](Self::json_set)
    pub fn json_get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get::<String>(key)? {
            Some(text) => decode(key, &text).map(Some),
            None => Ok(None),
        }
    }

    /// Store `value` as JSON text
    pub fn json_set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        validate_duration(duration)?;

        let text = encode(key, value)?;
        self.set(key, &text, duration)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
