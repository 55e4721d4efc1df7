//! Core types for cache operations

mod entry;
mod mode;
mod stats;

pub use entry::CacheEntry;
pub use mode::Mode;
pub use stats::CacheStats;
