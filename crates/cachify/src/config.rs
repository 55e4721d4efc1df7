//! Facade configuration

use cachify_core::{CachifyError, Mode, Result};

/// Environment variable holding the mode (`development` | `production`)
pub const MODE_VAR: &str = "CACHIFY_MODE";

/// Environment variable enabling trace output on new backends
pub const DEBUG_VAR: &str = "CACHIFY_DEBUG";

/// Settings the facade is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachifyConfig {
    /// Initial mode
    pub mode: Mode,
    /// Debug flag applied to every backend the facade builds
    pub debug: bool,
}

impl Default for CachifyConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Local,
            debug: false,
        }
    }
}

impl CachifyConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the debug flag
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Read the configuration from the process environment
    ///
    /// # Environment Variables
    /// - `CACHIFY_MODE` - `development` or `production` (required)
    /// - `CACHIFY_DEBUG` - `true`/`false`/`1`/`0` (default: false)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(MODE_VAR) {
            Some(value) => value.parse()?,
            None => {
                return Err(CachifyError::Configuration(format!(
                    "Unknown environment mode: {} is not set",
                    MODE_VAR
                )));
            }
        };

        let debug = match lookup(DEBUG_VAR).as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(CachifyError::Configuration(format!(
                    "Invalid flag. {} should be a boolean, got {}",
                    DEBUG_VAR, other
                )));
            }
        };

        Ok(Self { mode, debug })
    }
}
