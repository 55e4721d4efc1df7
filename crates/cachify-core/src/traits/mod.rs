//! Core traits for cache operations

mod remote;

pub use remote::{RemoteStore, prefix_pattern};
