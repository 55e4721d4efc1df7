//! Networked store trait

use async_trait::async_trait;

use crate::Result;

/// Client side of a networked key-value store
///
/// The handle is owned by the application and only borrowed by the Remote
/// backend, which never closes or reconfigures it. Implementations map
/// their I/O failures to [`CachifyError::Backend`](crate::CachifyError).
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
    /// Store a string value that expires after `ttl_secs` seconds
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<()>;

    /// Get a string value, `None` if missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete keys, returning how many existed
    async fn del(&self, keys: &[String]) -> Result<u64>;

    /// List keys matching a glob-style pattern
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Build a glob pattern matching every key that starts with `prefix`
///
/// Glob metacharacters inside the prefix are escaped so the match is on
/// the literal prefix.
pub fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}
