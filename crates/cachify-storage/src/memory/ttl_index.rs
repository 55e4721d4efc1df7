//! TTL-based expiration index for efficient expiration

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Time-wheel based TTL index
///
/// Keeps buckets of keys organized by the tick in which they come due, so a
/// sweep only looks at keys that may have expired. A key whose TTL is longer
/// than one revolution lands in the last bucket and must be rescheduled by
/// the caller when it comes due early.
pub struct TtlIndex {
    /// Bucket resolution
    tick: Duration,
    buckets: Vec<HashSet<String>>,
    current: usize,
    /// key -> bucket index for O(1) removal
    key_to_bucket: HashMap<String, usize>,
    last_tick: Instant,
}

impl TtlIndex {
    /// Create a new TTL index
    ///
    /// # Arguments
    /// * `tick` - Resolution of each time bucket
    /// * `max_ttl` - Longest TTL covered by one revolution of the wheel
    pub fn new(tick: Duration, max_ttl: Duration) -> Self {
        let tick = tick.max(Duration::from_millis(1));
        let num_buckets = ((max_ttl.as_millis() / tick.as_millis()) as usize + 1).max(60);

        Self {
            tick,
            buckets: vec![HashSet::new(); num_buckets],
            current: 0,
            key_to_bucket: HashMap::new(),
            last_tick: Instant::now(),
        }
    }

    /// Schedule a key for expiration after `ttl`
    pub fn schedule(&mut self, key: String, ttl: Duration) {
        self.remove(&key);

        let tick_ms = self.tick.as_millis();
        let ticks = ttl.as_millis().div_ceil(tick_ms).max(1) as usize;
        let offset = ticks.min(self.buckets.len() - 1);
        let bucket_idx = (self.current + offset) % self.buckets.len();

        self.buckets[bucket_idx].insert(key.clone());
        self.key_to_bucket.insert(key, bucket_idx);
    }

    /// Remove a key from the index
    pub fn remove(&mut self, key: &str) {
        if let Some(bucket_idx) = self.key_to_bucket.remove(key) {
            self.buckets[bucket_idx].remove(key);
        }
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.key_to_bucket.contains_key(key)
    }

    /// Advance the wheel and return the keys that came due
    pub fn tick(&mut self) -> Vec<String> {
        let elapsed = self.last_tick.elapsed();
        let ticks_to_advance = (elapsed.as_millis() / self.tick.as_millis()) as usize;

        if ticks_to_advance == 0 {
            return Vec::new();
        }

        let mut due = Vec::new();

        for _ in 0..ticks_to_advance.min(self.buckets.len()) {
            self.current = (self.current + 1) % self.buckets.len();
            let bucket_due: Vec<String> = self.buckets[self.current].drain().collect();

            for key in &bucket_due {
                self.key_to_bucket.remove(key);
            }

            due.extend(bucket_due);
        }

        self.last_tick += self.tick * ticks_to_advance as u32;
        due
    }

    /// Get the number of scheduled keys
    pub fn len(&self) -> usize {
        self.key_to_bucket.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_bucket.is_empty()
    }

    /// Clear all scheduled keys
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.key_to_bucket.clear();
    }
}

impl Default for TtlIndex {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(300))
    }
}
