//! # Obscura CLI
//!
//! Generates text challenge images from the command line.
//!
//! ## Usage
//! ```bash
//! # One challenge, secret on stdout
//! obscura generate --output challenge.jpg
//!
//! # Inline image for an HTML page
//! obscura --complexity high generate --data-uri
//!
//! # 500 challenges on all cores with a manifest
//! obscura batch --count 500 --output pool/
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use obscura::{CaptchaGenerator, Complexity, verify_text};

mod batch;
mod config;

use config::AppConfig;

/// Obscura - text challenge image generator
#[derive(Parser, Debug)]
#[command(name = "obscura")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/obscura.toml", global = true)]
    config: String,

    /// Image width in pixels (overrides config)
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Image height in pixels (overrides config)
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Rendering DPI (overrides config)
    #[arg(long, global = true)]
    dpi: Option<u32>,

    /// Number of characters in the secret (overrides config)
    #[arg(long, global = true)]
    length: Option<usize>,

    /// Noise complexity: low, medium or high (overrides config)
    #[arg(long, global = true)]
    complexity: Option<Complexity>,

    /// Border color as #RRGGBB (overrides config)
    #[arg(long, global = true)]
    border: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL", global = true)]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single challenge and print its secret
    Generate {
        /// Output image path (defaults to <output_dir>/challenge.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a data:image/jpeg;base64 URI instead of writing a file
        #[arg(long)]
        data_uri: bool,
    },

    /// Generate many challenges in parallel
    Batch {
        /// Number of challenges
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Output directory (defaults to config output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = auto-detect, overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check an answer against a secret (exit code 0 on match)
    Verify {
        /// Issued secret
        #[arg(long)]
        expected: String,

        /// User submitted answer
        #[arg(long)]
        submitted: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!(config = %args.config, options = ?config.captcha, "Configuration loaded");

    let generator = CaptchaGenerator::new().border_color(config.border_rgb()?);

    match &args.command {
        Command::Generate { output, data_uri } => {
            let challenge = generator
                .generate(&config.captcha)
                .context("Failed to generate challenge")?;
            let (image, secret) = challenge.into_parts();

            if *data_uri {
                println!("data:image/jpeg;base64,{}", STANDARD.encode(&image));
            } else {
                let path = output
                    .clone()
                    .unwrap_or_else(|| config.output_dir.join("challenge.jpg"));
                std::fs::write(&path, &image)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), bytes = image.len(), "Challenge written");
            }
            println!("{secret}");
        }
        Command::Batch { count, output, threads, quiet } => {
            let dir = output.clone().unwrap_or_else(|| config.output_dir.clone());
            let threads = threads.unwrap_or(config.threads);
            let report = batch::run_batch(&generator, &config.captcha, *count, &dir, threads, *quiet)?;
            println!(
                "Generated {} challenges ({} bytes), manifest: {}",
                report.generated,
                report.total_bytes,
                report.manifest.display()
            );
        }
        Command::Verify { expected, submitted } => {
            if verify_text(expected, submitted) {
                println!("match");
            } else {
                println!("mismatch");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialize structured logging with tracing (stderr; stdout carries output)
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
