//! Backend selector

use std::fmt;
use std::str::FromStr;

use crate::CachifyError;

/// Which backend variant is active
///
/// The environment names are `development` (in-process store) and
/// `production` (networked store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// In-process expiring map
    Local,
    /// Networked key-value store
    Remote,
}

impl Mode {
    /// Environment name for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Local => "development",
            Mode::Remote => "production",
        }
    }
}

impl FromStr for Mode {
    type Err = CachifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Mode::Local),
            "production" => Ok(Mode::Remote),
            other => Err(CachifyError::Configuration(format!(
                "Unknown environment mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("development".parse::<Mode>().unwrap(), Mode::Local);
        assert_eq!("production".parse::<Mode>().unwrap(), Mode::Remote);
    }

    #[test]
    fn test_parse_is_exact() {
        for bad in ["", "Production", "staging", " development"] {
            let err = bad.parse::<Mode>().unwrap_err();
            assert!(matches!(err, CachifyError::Configuration(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_display_matches_parse() {
        for mode in [Mode::Local, Mode::Remote] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
