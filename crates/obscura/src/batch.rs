//! Parallel batch generation with a JSON manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use obscura::{CaptchaGenerator, ChallengeOptions};
use rayon::prelude::*;
use serde::Serialize;

/// Manifest file written next to the images
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
struct ManifestEntry {
    file: String,
    secret: String,
    bytes: usize,
}

#[derive(Debug, Serialize)]
struct Manifest {
    generated_at: String,
    options: ChallengeOptions,
    challenges: Vec<ManifestEntry>,
}

/// Outcome of a batch run
#[derive(Debug)]
pub struct BatchReport {
    pub generated: usize,
    pub total_bytes: usize,
    pub manifest: PathBuf,
}

/// Generate `count` challenges into `output_dir` on `threads` workers
/// (0 = one per core), showing progress unless `quiet`.
pub fn run_batch(
    generator: &CaptchaGenerator,
    opts: &ChallengeOptions,
    count: usize,
    output_dir: &Path,
    threads: usize,
    quiet: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let threads = if threads == 0 { num_cpus() } else { threads };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build worker pool")?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(count as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    tracing::info!(count, threads, dir = %output_dir.display(), "Generating CAPTCHA batch");

    let challenges: Vec<ManifestEntry> = pool.install(|| {
        (0..count)
            .into_par_iter()
            .progress_with(pb.clone())
            .map(|i| -> Result<ManifestEntry> {
                let (image, secret) = generator.generate(opts)?.into_parts();
                let file = format!("challenge_{i:04}.jpg");
                std::fs::write(output_dir.join(&file), &image)
                    .with_context(|| format!("Failed to write {file}"))?;
                Ok(ManifestEntry {
                    file,
                    secret,
                    bytes: image.len(),
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    pb.finish_and_clear();

    let total_bytes = challenges.iter().map(|c| c.bytes).sum();
    let manifest = Manifest {
        generated_at: chrono::Utc::now().to_rfc3339(),
        options: *opts,
        challenges,
    };

    let manifest_path = output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    std::fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(BatchReport {
        generated: manifest.challenges.len(),
        total_bytes,
        manifest: manifest_path,
    })
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}
