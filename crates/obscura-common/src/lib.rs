//! # Obscura Common
//!
//! Shared types, errors, and constants used across Obscura components.
//!
//! ## Modules
//! - `types` - Challenge options and the noise complexity tier
//! - `error` - The engine error type
//! - `constants` - Defaults, density tables, and the challenge alphabet

pub mod constants;
pub mod error;
pub mod types;

pub use error::{CaptchaError, Result};
pub use types::*;
