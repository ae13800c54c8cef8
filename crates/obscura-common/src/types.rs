//! Core types shared across Obscura components.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DPI, DEFAULT_HEIGHT, DEFAULT_TEXT_LENGTH, DEFAULT_WIDTH, noise_density,
    text_noise_density,
};
use crate::error::{CaptchaError, Result};

/// Noise density tier.
///
/// - Low: sparsest speckle and fewest decoy glyphs
/// - Medium: moderate
/// - High: densest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Pixels per speckle particle (lower means more particles)
    pub const fn noise_density(self) -> u32 {
        match self {
            Self::Low => noise_density::LOW,
            Self::Medium => noise_density::MEDIUM,
            Self::High => noise_density::HIGH,
        }
    }

    /// Pixels per decoy glyph (lower means more glyphs)
    pub const fn text_noise_density(self) -> u32 {
        match self {
            Self::Low => text_noise_density::LOW,
            Self::Medium => text_noise_density::MEDIUM,
            Self::High => text_noise_density::HIGH,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown complexity '{other}' (expected low, medium or high)")),
        }
    }
}

/// Parameters of a single challenge request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOptions {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Rendering DPI (scales font sizes)
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Number of characters in the secret
    #[serde(default = "default_text_length")]
    pub text_length: usize,

    /// Noise density tier
    #[serde(default)]
    pub complexity: Complexity,
}

fn default_width() -> u32 { DEFAULT_WIDTH }
fn default_height() -> u32 { DEFAULT_HEIGHT }
fn default_dpi() -> u32 { DEFAULT_DPI }
fn default_text_length() -> usize { DEFAULT_TEXT_LENGTH }

impl Default for ChallengeOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            text_length: default_text_length(),
            complexity: Complexity::default(),
        }
    }
}

impl ChallengeOptions {
    /// Replace zero values with their defaults
    pub fn normalized(mut self) -> Self {
        if self.width == 0 {
            self.width = default_width();
        }
        if self.height == 0 {
            self.height = default_height();
        }
        if self.dpi == 0 {
            self.dpi = default_dpi();
        }
        if self.text_length == 0 {
            self.text_length = default_text_length();
        }
        self
    }

    /// Reject zero dimensions, DPI, or text length
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::InvalidInput(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.dpi == 0 {
            return Err(CaptchaError::InvalidInput("dpi must be positive".to_string()));
        }
        if self.text_length == 0 {
            return Err(CaptchaError::InvalidInput(
                "text length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ChallengeOptions::default();
        assert_eq!((opts.width, opts.height, opts.dpi), (240, 80, 72));
        assert_eq!(opts.text_length, 4);
        assert_eq!(opts.complexity, Complexity::Low);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let opts = ChallengeOptions { text_length: 0, ..Default::default() };
        assert!(matches!(opts.validate(), Err(CaptchaError::InvalidInput(_))));

        let opts = ChallengeOptions { width: 0, ..Default::default() };
        assert!(opts.validate().is_err());

        let opts = ChallengeOptions { dpi: 0, ..Default::default() };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_normalized_fills_defaults() {
        let opts = ChallengeOptions {
            width: 0,
            height: 0,
            dpi: 0,
            text_length: 0,
            complexity: Complexity::High,
        }
        .normalized();
        assert_eq!(opts, ChallengeOptions { complexity: Complexity::High, ..Default::default() });
    }

    #[test]
    fn test_density_tiers() {
        assert_eq!(Complexity::Low.noise_density(), 28);
        assert_eq!(Complexity::Medium.noise_density(), 18);
        assert_eq!(Complexity::High.noise_density(), 8);
        assert_eq!(Complexity::Low.text_noise_density(), 2000);
        assert_eq!(Complexity::High.text_noise_density(), 1000);
    }

    #[test]
    fn test_complexity_parse() {
        assert_eq!("HIGH".parse::<Complexity>(), Ok(Complexity::High));
        assert!("extreme".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_options_deserialize_partial() {
        let opts: ChallengeOptions =
            serde_json::from_str(r#"{"width": 300, "complexity": "medium"}"#).unwrap();
        assert_eq!(opts.width, 300);
        assert_eq!(opts.height, 80);
        assert_eq!(opts.complexity, Complexity::Medium);
    }
}
