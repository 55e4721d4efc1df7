//! Cache entry type

use std::time::{Duration, Instant};

/// A stored value with its expiration
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was written
    pub created_at: Instant,
    /// Time-to-live measured from `created_at`
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Create an entry written now
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Check if entry has expired
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Get remaining TTL, `None` once expired
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.ttl
            .checked_sub(self.created_at.elapsed())
            .filter(|d| !d.is_zero())
    }
}
