//! Mode-driven backend selection

use std::sync::Arc;
use tracing::info;

use cachify_core::{CachifyError, Mode, RemoteStore, Result};

use crate::{Backend, CachifyConfig, LocalBackend, RemoteBackend};

/// Holds exactly one active [`Backend`], chosen by [`Mode`]
///
/// The Remote connection is supplied by the caller and kept here across
/// mode switches; switching away from Remote drops the backend but never
/// the connection.
pub struct Cachify {
    mode: Mode,
    debug: bool,
    connection: Option<Arc<dyn RemoteStore>>,
    instance: Backend,
}

impl Cachify {
    /// Build the facade for `config.mode`
    ///
    /// Fails with [`CachifyError::Configuration`] when the mode is Remote
    /// and no connection was supplied.
    pub fn new(config: CachifyConfig, connection: Option<Arc<dyn RemoteStore>>) -> Result<Self> {
        let instance = create_instance(config.mode, connection.as_ref(), config.debug)?;

        Ok(Self {
            mode: config.mode,
            debug: config.debug,
            connection,
            instance,
        })
    }

    /// Build the facade from `CACHIFY_MODE` / `CACHIFY_DEBUG`
    pub fn from_env(connection: Option<Arc<dyn RemoteStore>>) -> Result<Self> {
        Self::new(CachifyConfig::from_env()?, connection)
    }

    /// Build the facade from settings read through `lookup`
    ///
    /// An unrecognized mode name fails construction.
    pub fn from_lookup<F>(lookup: F, connection: Option<Arc<dyn RemoteStore>>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(CachifyConfig::from_lookup(lookup)?, connection)
    }

    /// The active backend
    pub fn instance(&self) -> &Backend {
        &self.instance
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to `mode`, building a fresh backend if it differs
    ///
    /// Entries are not carried over. On error the current mode and backend
    /// stay in place.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }

        let instance = create_instance(mode, self.connection.as_ref(), self.debug)?;
        info!(target: "cachify", from = %self.mode, to = %mode, "Switched cache mode");
        self.mode = mode;
        self.instance = instance;
        Ok(())
    }

    /// Switch using an environment mode name
    pub fn set_mode_str(&mut self, value: &str) -> Result<()> {
        self.set_mode(value.parse()?)
    }

    /// The caller-supplied Remote connection, if any
    pub fn connection(&self) -> Option<&Arc<dyn RemoteStore>> {
        self.connection.as_ref()
    }

    /// A standalone Local backend, outside any mode selection
    pub fn local() -> LocalBackend {
        LocalBackend::new()
    }

    /// A standalone Remote backend over `connection`
    pub fn remote(connection: Arc<dyn RemoteStore>) -> RemoteBackend {
        RemoteBackend::new(connection)
    }
}

fn create_instance(
    mode: Mode,
    connection: Option<&Arc<dyn RemoteStore>>,
    debug: bool,
) -> Result<Backend> {
    let backend = match mode {
        Mode::Local => Backend::Local(LocalBackend::new()),
        Mode::Remote => {
            let connection = connection.ok_or_else(|| {
                CachifyError::Configuration(
                    "Redis connection object is required in production mode.".to_string(),
                )
            })?;
            Backend::Remote(RemoteBackend::new(Arc::clone(connection)))
        }
    };
    backend.set_debug(debug);
    Ok(backend)
}
