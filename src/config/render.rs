//! # Render Configuration
//!
//! Parameters for a batch render run. This is the common interface between
//! the CLI and the [`crate::processing`] pipeline.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `output_dir` | `PathBuf` | Any writable path | Root of the generated resource tree |
//! | `targets` | `Vec<DensityBucket>` | non-empty, no duplicates | Densities to generate |
//! | `category` | `OutputCategory` | drawable / mipmap | Directory family |
//! | `fallback` | `Option<DensityBucket>` | one of `targets` | Also write this density to the density-less directory |
//! | `override_mode` | `OverrideMode` | always / never / if-modified | What to do with existing outputs |
//! | `ninepatch` | `Option<PathBuf>` | existing JSON file | Variant definitions |
//! | `jobs` | `usize` | 1-256 | Concurrent resources |
//!
//! ## Examples
//!
//! ```rust
//! use densify::config::render::RenderConfig;
//! use densify::density::DensityBucket;
//!
//! let mut config = RenderConfig::default();
//! assert!(config.validate().is_ok());
//!
//! config.fallback = Some(DensityBucket::Ldpi);
//! assert!(config.validate().is_err());
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::density::DensityBucket;
use crate::error::{DensifyError, DensifyResult};
use crate::resource::OutputCategory;

/// What to do when an output file already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverrideMode {
    /// Always rewrite.
    #[default]
    Always,
    /// Keep existing outputs untouched.
    Never,
    /// Rewrite only when the source is newer than the output.
    IfModified,
}

impl OverrideMode {
    /// Whether `output` should be (re)written from `source`.
    ///
    /// Missing outputs are always written; timestamps that cannot be read
    /// count as modified.
    pub fn should_write(self, source: &Path, output: &Path) -> bool {
        if !output.exists() {
            return true;
        }
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::IfModified => {
                let modified = |p: &Path| -> Option<SystemTime> { p.metadata().ok()?.modified().ok() };
                match (modified(source), modified(output)) {
                    (Some(src), Some(out)) => src > out,
                    _ => true,
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Root directory the `<category>-<qualifiers>/` folders are created in.
    pub output_dir: PathBuf,

    /// Densities to render every source at.
    pub targets: Vec<DensityBucket>,

    pub category: OutputCategory,

    /// When set, renders for this target are also copied into the
    /// density-less directory (e.g. `drawable/`).
    pub fallback: Option<DensityBucket>,

    pub override_mode: OverrideMode,

    /// JSON file with nine-patch variant definitions.
    pub ninepatch: Option<PathBuf>,

    /// Maximum number of resources processed concurrently.
    pub jobs: usize,
}

impl Default for RenderConfig {
    /// Default values:
    /// - `output_dir`: "res"
    /// - `targets`: mdpi, hdpi, xhdpi, xxhdpi, xxxhdpi
    /// - `category`: drawable
    /// - `jobs`: available parallelism, or 4 if unknown
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("res"),
            targets: vec![
                DensityBucket::Mdpi,
                DensityBucket::Hdpi,
                DensityBucket::Xhdpi,
                DensityBucket::Xxhdpi,
                DensityBucket::Xxxhdpi,
            ],
            category: OutputCategory::Drawable,
            fallback: None,
            override_mode: OverrideMode::Always,
            ninepatch: None,
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl RenderConfig {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        targets: Vec<DensityBucket>,
        category: OutputCategory,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            targets,
            category,
            ..Self::default()
        }
    }

    /// Checks every documented constraint, reporting the first violation.
    pub fn validate(&self) -> DensifyResult<()> {
        if self.targets.is_empty() {
            return Err(DensifyError::config(
                "targets",
                "",
                "at least one target density is required",
            ));
        }
        let mut seen = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            if seen.contains(target) {
                return Err(DensifyError::config(
                    "targets",
                    target.name(),
                    "target density listed twice",
                ));
            }
            seen.push(*target);
        }
        if let Some(fallback) = self.fallback {
            if !self.targets.contains(&fallback) {
                return Err(DensifyError::config(
                    "fallback",
                    fallback.name(),
                    "fallback density must be one of the targets",
                ));
            }
        }
        if !(1..=256).contains(&self.jobs) {
            return Err(DensifyError::config(
                "jobs",
                self.jobs.to_string(),
                "must be between 1 and 256",
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(DensifyError::config("output_dir", "", "must not be empty"));
        }
        if let Some(path) = &self.ninepatch {
            if !path.is_file() {
                return Err(DensifyError::config(
                    "ninepatch",
                    path.display().to_string(),
                    "nine-patch configuration file not found",
                ));
            }
        }
        Ok(())
    }
}
