//! Argument validation run at the start of every public operation

use std::time::Duration;

use crate::{CachifyError, Result};

/// Reject empty keys (and empty prefixes, which share the rule)
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CachifyError::InvalidArgument(
            "Invalid key. It should be a non-empty string.".to_string(),
        ));
    }
    Ok(())
}

/// Reject durations that are not strictly positive
pub fn validate_duration(duration: Duration) -> Result<()> {
    if duration.is_zero() {
        return Err(CachifyError::InvalidArgument(
            "Invalid expiration time. It should be a positive number.".to_string(),
        ));
    }
    Ok(())
}
