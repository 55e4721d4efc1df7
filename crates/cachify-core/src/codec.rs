//! JSON encoding helpers that attach the key to every failure

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{CachifyError, Result};

/// Serialize a value to JSON text
pub fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| CachifyError::serialization(key, e))
}

/// Parse JSON text into a value
pub fn decode<T: DeserializeOwned>(key: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| CachifyError::deserialization(key, e))
}

/// Convert a value into a JSON tree without going through text
pub fn encode_value<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| CachifyError::serialization(key, e))
}

/// Convert a JSON tree back into a typed value
pub fn decode_value<T: DeserializeOwned>(key: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CachifyError::deserialization(key, e))
}
