//! cachify-core: Core types, validation and traits for cachify
//!
//! This crate provides the pieces shared by every cachify backend: the
//! error type, argument validation, the mode selector and the trait the
//! Remote backend talks to.

mod codec;
mod error;
mod trace;
mod traits;
mod types;
mod validate;

pub use codec::{decode, decode_value, encode, encode_value};
pub use error::{CachifyError, Result};
pub use trace::DebugTrace;
pub use traits::*;
pub use types::*;
pub use validate::{validate_duration, validate_key};
