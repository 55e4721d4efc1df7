//! cachify: one cache API over an in-process store or Redis
//!
//! Application code calls the same operations (`set`, `get`, `dispose`,
//! `dispose_prefix`, `cachify`, `json_get`/`json_set`) whichever store is
//! active. The [`Cachify`] facade picks the store from a [`Mode`]:
//! `development` runs on an in-process expiring map, `production` on a
//! networked store reached through a caller-owned connection.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cachify::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), CachifyError> {
//!     let cache = Cachify::new(CachifyConfig::new(Mode::Local), None)?;
//!
//!     let answer: u32 = cache
//!         .instance()
//!         .cachify("answer", || async { Ok::<_, CachifyError>(42) }, Duration::from_secs(60))
//!         .await?;
//!     assert_eq!(answer, 42);
//!
//!     cache.instance().dispose_prefix("ans").await?;
//!     Ok(())
//! }
//! ```

mod backend;
mod config;
mod facade;

pub use cachify_core::*;
pub use cachify_storage::{MemoryConfig, MemoryStore};

#[cfg(feature = "redis")]
pub use cachify_storage::{RedisConfig, RedisStore};

pub use backend::{Backend, LocalBackend, RemoteBackend};
pub use config::CachifyConfig;
pub use facade::Cachify;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Backend, Cachify, CachifyConfig, CachifyError, LocalBackend, Mode, RemoteBackend,
        RemoteStore, Result,
    };

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisStore};
}

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests;
