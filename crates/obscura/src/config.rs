//! Configuration management for the Obscura CLI.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use obscura_common::ChallengeOptions;
use obscura_common::constants::{DEFAULT_BORDER_COLOR, ENV_PREFIX};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Challenge parameters (zero values fall back to defaults)
    #[serde(default)]
    pub captcha: ChallengeOptions,

    /// Border color as `#RRGGBB`
    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Directory generated images are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Worker threads for batch generation (0 = one per core)
    #[serde(default)]
    pub threads: usize,
}

// Default value functions
fn default_border_color() -> String {
    let [r, g, b] = DEFAULT_BORDER_COLOR;
    format!("#{r:02X}{g:02X}{b:02X}")
}
fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            captcha: ChallengeOptions::default(),
            border_color: default_border_color(),
            output_dir: default_output_dir(),
            threads: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut builder = config::Config::builder();

        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            tracing::debug!(path = %config_path, "Config file not found, using defaults");
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        // Apply CLI overrides
        if let Some(width) = args.width {
            config.captcha.width = width;
        }
        if let Some(height) = args.height {
            config.captcha.height = height;
        }
        if let Some(dpi) = args.dpi {
            config.captcha.dpi = dpi;
        }
        if let Some(length) = args.length {
            config.captcha.text_length = length;
        }
        if let Some(complexity) = args.complexity {
            config.captcha.complexity = complexity;
        }
        if let Some(ref border) = args.border {
            config.border_color = border.clone();
        }

        config.captcha = config.captcha.normalized();
        Ok(config)
    }

    /// Border color as RGB
    pub fn border_rgb(&self) -> Result<[u8; 3]> {
        parse_hex_color(&self.border_color)
    }
}

/// Parse `#RRGGBB` (leading `#` optional)
pub fn parse_hex_color(value: &str) -> Result<[u8; 3]> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("invalid color {value:?}: expected #RRGGBB");
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("invalid color {value:?}: bad hex digits"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
