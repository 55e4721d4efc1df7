//! Cache backends and the tagged union the facade holds

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use cachify_core::{CachifyError, Mode, Result};

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// The active backend
///
/// Exposes the operations of both variants behind one asynchronous surface.
/// Local operations finish without suspending; Remote operations await the
/// store.
pub enum Backend {
    Local(LocalBackend),
    Remote(RemoteBackend),
}

impl Backend {
    /// The mode this backend serves
    pub fn mode(&self) -> Mode {
        match self {
            Backend::Local(_) => Mode::Local,
            Backend::Remote(_) => Mode::Remote,
        }
    }

    pub fn as_local(&self) -> Option<&LocalBackend> {
        match self {
            Backend::Local(backend) => Some(backend),
            Backend::Remote(_) => None,
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteBackend> {
        match self {
            Backend::Local(_) => None,
            Backend::Remote(backend) => Some(backend),
        }
    }

    pub async fn set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        match self {
            Backend::Local(backend) => backend.set(key, value, duration),
            Backend::Remote(backend) => backend.set(key, value, duration).await,
        }
    }

    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self {
            Backend::Local(backend) => backend.get(key),
            Backend::Remote(backend) => backend.get(key).await,
        }
    }

    pub async fn dispose(&self, key: &str) -> Result<()> {
        match self {
            Backend::Local(backend) => backend.dispose(key),
            Backend::Remote(backend) => backend.dispose(key).await,
        }
    }

    pub async fn dispose_prefix(&self, prefix: &str) -> Result<()> {
        match self {
            Backend::Local(backend) => backend.dispose_prefix(prefix),
            Backend::Remote(backend) => backend.dispose_prefix(prefix).await,
        }
    }

    /// Cache-aside read; see [`LocalBackend::cachify`]
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
        match self {
            Backend::Local(backend) => backend.cachify(key, producer, duration).await,
            Backend::Remote(backend) => backend.cachify(key, producer, duration).await,
        }
    }

    pub fn set_debug(&self, flag: bool) {
        match self {
            Backend::Local(backend) => backend.set_debug(flag),
            Backend::Remote(backend) => backend.set_debug(flag),
        }
    }

    pub fn is_debug(&self) -> bool {
        match self {
            Backend::Local(backend) => backend.is_debug(),
            Backend::Remote(backend) => backend.is_debug(),
        }
    }

    pub async fn json_get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self {
            Backend::Local(backend) => backend.json_get(key),
            Backend::Remote(backend) => backend.json_get(key).await,
        }
    }

    pub async fn json_set<T>(&self, key: &str, value: &T, duration: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        match self {
            Backend::Local(backend) => backend.json_set(key, value, duration),
            Backend::Remote(backend) => backend.json_set(key, value, duration).await,
        }
    }
}

impl From<LocalBackend> for Backend {
    fn from(backend: LocalBackend) -> Self {
        Backend::Local(backend)
    }
}

impl From<RemoteBackend> for Backend {
    fn from(backend: RemoteBackend) -> Self {
        Backend::Remote(backend)
    }
}
