//! Debug-gated trace output for cache events

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Per-backend switch for human-readable cache event lines
///
/// Off by default. Events are written through `tracing` under the
/// `cachify` target only while the switch is on. Clones share one switch.
#[derive(Debug, Clone, Default)]
pub struct DebugTrace {
    enabled: Arc<AtomicBool>,
}

impl DebugTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_key(&self, key: &str) {
        if self.is_enabled() {
            info!(target: "cachify", event = "set", key = %key, "Set cache for key: {}", key);
        }
    }

    pub fn hit(&self, key: &str) {
        if self.is_enabled() {
            info!(target: "cachify", event = "hit", key = %key, "Cache hit for key: {}", key);
        }
    }

    pub fn miss(&self, key: &str) {
        if self.is_enabled() {
            info!(target: "cachify", event = "miss", key = %key, "Cache miss for key: {}", key);
        }
    }

    pub fn disposed(&self, key: &str) {
        if self.is_enabled() {
            info!(target: "cachify", event = "dispose", key = %key, "Disposed cache for key: {}", key);
        }
    }

    pub fn disposed_prefix(&self, prefix: &str, count: u64) {
        if self.is_enabled() {
            info!(
                target: "cachify",
                event = "dispose_prefix",
                prefix = %prefix,
                count,
                "Disposed cache for keys with prefix: {}",
                prefix
            );
        }
    }
}
