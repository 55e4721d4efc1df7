//! In-memory expiring map using DashMap

use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::time::Duration;

use cachify_core::{CacheEntry, CacheStats};

use super::ttl_index::TtlIndex;

/// Configuration for the memory store
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Maximum number of entries (0 = unlimited)
    pub max_capacity: usize,
    /// Resolution of the expiration sweep
    pub sweep_tick: Duration,
    /// Span of one revolution of the TTL index; longer TTLs are
    /// rescheduled each time they come due early
    pub max_ttl: Duration,
    /// Sweep expired entries on write instead of only on read
    pub enable_ttl_index: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_capacity: 0,
            sweep_tick: Duration::from_secs(1),
            max_ttl: Duration::from_secs(300),
            enable_ttl_index: true,
        }
    }
}

impl MemoryConfig {
    /// Create config with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            max_capacity: capacity,
            ..Default::default()
        }
    }

    /// Create config with unlimited capacity
    pub fn unlimited() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct MemoryStats {
    hits: u64,
    misses: u64,
    writes: u64,
    deletes: u64,
    evictions: u64,
}

/// In-process expiring key-value map
///
/// Expired entries are never returned: reads check the entry's deadline and
/// drop it on the spot, and writes advance the TTL index to sweep entries
/// that came due in the meantime.
pub struct MemoryStore {
    data: DashMap<String, CacheEntry<Value>>,
    ttl_index: RwLock<TtlIndex>,
    stats: RwLock<MemoryStats>,
    config: MemoryConfig,
}

impl MemoryStore {
    pub fn new(config: MemoryConfig) -> Self {
        let ttl_index = TtlIndex::new(config.sweep_tick, config.max_ttl);

        Self {
            data: DashMap::new(),
            ttl_index: RwLock::new(ttl_index),
            stats: RwLock::new(MemoryStats::default()),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(MemoryConfig::default())
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry
    pub fn put(&self, key: &str, value: Value, ttl: Duration) {
        if self.config.enable_ttl_index {
            self.cleanup_expired();
        }
        if !self.data.contains_key(key) {
            self.maybe_evict();
        }

        if self.config.enable_ttl_index {
            self.ttl_index.write().schedule(key.to_string(), ttl);
        }
        self.data.insert(key.to_string(), CacheEntry::new(value, ttl));
        self.stats.write().writes += 1;
    }

    /// Get the live value for `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        let expired = match self.data.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.write().hits += 1;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired && self.data.remove_if(key, |_, entry| entry.is_expired()).is_some() {
            self.ttl_index.write().remove(key);
            self.stats.write().evictions += 1;
        }
        self.stats.write().misses += 1;
        None
    }

    /// Remove `key`, returning whether a live entry was removed
    pub fn remove(&self, key: &str) -> bool {
        match self.data.remove(key) {
            Some((_, entry)) => {
                self.ttl_index.write().remove(key);
                if entry.is_expired() {
                    self.stats.write().evictions += 1;
                    false
                } else {
                    self.stats.write().deletes += 1;
                    true
                }
            }
            None => false,
        }
    }

    /// Keys of all live entries
    pub fn keys(&self) -> Vec<String> {
        self.data
            .iter()
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.data.iter().filter(|entry| !entry.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.data.clear();
        self.ttl_index.write().clear();
    }

    /// Sweep entries whose TTL index bucket came due
    ///
    /// Returns the number of expired entries removed. Keys that came due
    /// early (TTL longer than one revolution) are rescheduled.
    pub fn cleanup_expired(&self) -> usize {
        let due = self.ttl_index.write().tick();
        let mut count = 0;

        for key in due {
            if self
                .data
                .remove_if(&key, |_, entry| entry.is_expired())
                .is_some()
            {
                count += 1;
            } else if let Some(remaining) = self.data.get(&key).and_then(|e| e.ttl_remaining()) {
                self.ttl_index.write().schedule(key, remaining);
            }
        }

        if count > 0 {
            self.stats.write().evictions += count as u64;
        }
        count
    }

    pub fn stats(&self) -> CacheStats {
        let stats = self.stats.read();
        CacheStats {
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            deletes: stats.deletes,
            evictions: stats.evictions,
            size: self.len(),
        }
    }

    /// Make room for one more entry when a capacity is configured
    ///
    /// Expired entries go first, then the entries closest to expiring.
    fn maybe_evict(&self) {
        if self.config.max_capacity == 0 || self.data.len() < self.config.max_capacity {
            return;
        }

        let before = self.data.len();
        self.data.retain(|_, entry| !entry.is_expired());
        let mut evicted = (before - self.data.len()) as u64;

        let excess = (self.data.len() + 1).saturating_sub(self.config.max_capacity);
        if excess > 0 {
            let mut by_deadline: Vec<(String, Duration)> = self
                .data
                .iter()
                .map(|entry| {
                    (
                        entry.key().clone(),
                        entry.ttl_remaining().unwrap_or_default(),
                    )
                })
                .collect();
            by_deadline.sort_by_key(|(_, remaining)| *remaining);

            for (key, _) in by_deadline.into_iter().take(excess) {
                if self.data.remove(&key).is_some() {
                    self.ttl_index.write().remove(&key);
                    evicted += 1;
                }
            }
        }

        self.stats.write().evictions += evicted;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
