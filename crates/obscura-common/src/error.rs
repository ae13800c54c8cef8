//! Common error types for Obscura components.

use thiserror::Error;

/// Result alias used throughout the engine
pub type Result<T, E = CaptchaError> = std::result::Result<T, E>;

/// Errors produced while synthesizing a challenge.
///
/// Payloads are plain strings so a failure can be cached and handed to
/// every later caller (the font catalogue does exactly that).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptchaError {
    /// Entropy source failed while drawing the secret or visual jitter
    #[error("Randomness error: {0}")]
    Randomness(String),

    /// Embedded font resource missing or corrupt
    #[error("Font load error: {0}")]
    FontLoad(String),

    /// A drawing operation could not complete
    #[error("Draw error in {operation}: {reason}")]
    Draw {
        operation: &'static str,
        reason: String,
    },

    /// Final serialization failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Rejected request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CaptchaError {
    /// Tags an error raised inside a drawing operation with the operation
    /// name. Font and randomness failures keep their kind.
    pub fn in_operation(self, operation: &'static str) -> Self {
        match self {
            Self::FontLoad(reason) => Self::FontLoad(format!("{operation}: {reason}")),
            Self::Randomness(reason) => Self::Randomness(format!("{operation}: {reason}")),
            Self::Draw { .. } => self,
            other => Self::Draw {
                operation,
                reason: other.to_string(),
            },
        }
    }

    /// Returns the HTTP status code a caller should map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Randomness(_) => 500,
            Self::FontLoad(_) => 500,
            Self::Draw { .. } => 500,
            Self::Encoding(_) => 500,
        }
    }

    /// Returns the short name of the error kind, for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Randomness(_) => "randomness",
            Self::FontLoad(_) => "font_load",
            Self::Draw { .. } => "draw",
            Self::Encoding(_) => "encoding",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}
