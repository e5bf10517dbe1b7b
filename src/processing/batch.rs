//! # Batch Rendering
//!
//! Renders many source resources at every configured target density.
//!
//! Each source is one job. Jobs run on tokio's blocking pool, at most
//! `RenderConfig::jobs` at a time, and never share mutable state: the variant
//! pool and rasterizer are read-only behind `Arc`s. A job that fails is
//! recorded in the [`BatchReport`] and its siblings carry on.
//!
//! Per source and target:
//!
//! 1. parse the file name into a [`ResourceDescriptor`] and measure its bounds
//! 2. pick the best nine-patch variant (if a pool was given)
//! 3. plan the canvas (framed when a variant applies), rasterize, paint markers
//! 4. write `<out>/<category>-<qualifiers>/<name>[.9].png`, plus the
//!    density-less fallback copy when the target is the fallback density
//!
//! Existing outputs are handled according to [`OverrideMode`](crate::config::OverrideMode).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use densify_scale::ninepatch;
use densify_scale::plan::{build_plan, Framing};
use futures_util::future::join_all;
use log::{debug, error, info, warn};
use tokio::sync::Semaphore;

use crate::config::RenderConfig;
use crate::error::{classify, DensifyError, DensifyResult};
use crate::processing::rasterizer::Rasterizer;
use crate::resource::ResourceDescriptor;
use crate::variant::VariantPool;

/// Outputs produced for one source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceOutcome {
    pub written: Vec<PathBuf>,
    /// Existing outputs left alone by the override policy.
    pub skipped: Vec<PathBuf>,
    /// Name of the nine-patch variant applied, if any.
    pub variant: Option<String>,
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Sources that could not be rendered, with the reason.
    pub failed: Vec<(PathBuf, DensifyError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn absorb(&mut self, source: PathBuf, result: DensifyResult<ResourceOutcome>) {
        match result {
            Ok(outcome) => {
                self.written.extend(outcome.written);
                self.skipped.extend(outcome.skipped);
            }
            Err(e) => {
                if classify::aborts_batch(&e) {
                    error!("{}: {}", source.display(), e);
                } else {
                    warn!("skipping {}: {}", source.display(), e);
                }
                self.failed.push((source, e));
            }
        }
    }
}

/// Render a single source at every target in `config`.
pub fn render_resource(
    source: &Path,
    config: &RenderConfig,
    pool: Option<&VariantPool>,
    rasterizer: &dyn Rasterizer,
) -> DensifyResult<ResourceOutcome> {
    let descriptor = ResourceDescriptor::from_path(source)?;
    let image = rasterizer.load(source)?;
    let descriptor = descriptor.with_bounds(image.bounds());

    let variant = pool.and_then(|p| p.best_match_for(&descriptor));
    match variant {
        Some(v) => debug!("{}: nine-patch variant '{}'", source.display(), v.name()),
        None => debug!("{}: no nine-patch variant", source.display()),
    }
    let framing = if variant.is_some() {
        Framing::NinePatchBorder
    } else {
        Framing::Plain
    };
    let file_name = descriptor.output_file(variant.is_some());

    let mut outcome = ResourceOutcome {
        variant: variant.map(|v| v.name().to_string()),
        ..ResourceOutcome::default()
    };
    let mut canvas = Vec::new();

    for &target in &config.targets {
        let mut destinations = vec![config
            .output_dir
            .join(descriptor.output_dir(config.category, target))
            .join(&file_name)];
        if config.fallback == Some(target) {
            destinations.push(
                config
                    .output_dir
                    .join(descriptor.fallback_dir(config.category))
                    .join(&file_name),
            );
        }

        let (pending, kept): (Vec<PathBuf>, Vec<PathBuf>) = destinations
            .into_iter()
            .partition(|dest| config.override_mode.should_write(source, dest));
        for dest in &kept {
            debug!("keeping existing {}", dest.display());
        }
        outcome.skipped.extend(kept);
        if pending.is_empty() {
            continue;
        }

        let ratio = descriptor.ratio(target)?;
        let plan = build_plan(image.size, ratio, framing)?;
        canvas.clear();
        canvas.resize(plan.canvas_len(), 0);
        rasterizer.rasterize(&image, &plan, &mut canvas)?;
        if let Some(v) = variant {
            ninepatch::mark(&mut canvas, &plan, v.stretch(), v.content())
                .map_err(|e| DensifyError::from(e).with_context(format!("variant '{}'", v.name())))?;
        }

        for dest in pending {
            if let Some(dir) = dest.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| DensifyError::io("create_output_dir", e).with_path(dir))?;
            }
            image::save_buffer(
                &dest,
                &canvas,
                plan.canvas.w,
                plan.canvas.h,
                image::ColorType::Rgba8,
            )
            .map_err(|e| {
                DensifyError::from(e)
                    .with_operation("write_output")
                    .with_metadata("path", dest.display().to_string())
            })?;
            info!(
                "wrote {} ({}x{})",
                dest.display(),
                plan.canvas.w,
                plan.canvas.h
            );
            outcome.written.push(dest);
        }
    }
    Ok(outcome)
}

/// Concurrent renderer over a fixed configuration.
pub struct BatchRenderer {
    config: Arc<RenderConfig>,
    pool: Option<Arc<VariantPool>>,
    rasterizer: Arc<dyn Rasterizer>,
}

impl BatchRenderer {
    /// Validates `config` up front so a bad run fails before any job starts.
    pub fn new(
        config: RenderConfig,
        pool: Option<Arc<VariantPool>>,
        rasterizer: Arc<dyn Rasterizer>,
    ) -> DensifyResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            pool,
            rasterizer,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every source, returning once all jobs have finished.
    pub async fn run(&self, sources: Vec<PathBuf>) -> BatchReport {
        let semaphore = Arc::new(Semaphore::new(self.config.jobs));
        info!(
            "rendering {} source(s) at {} target(s) with {} job(s)",
            sources.len(),
            self.config.targets.len(),
            self.config.jobs
        );

        let jobs = sources.into_iter().map(|source| {
            let semaphore = Arc::clone(&semaphore);
            let config = Arc::clone(&self.config);
            let pool = self.pool.clone();
            let rasterizer = Arc::clone(&self.rasterizer);
            async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(permit) => {
                        let path = source.clone();
                        tokio::task::spawn_blocking(move || {
                            let _permit = permit;
                            render_resource(&path, &config, pool.as_deref(), rasterizer.as_ref())
                        })
                        .await
                        .unwrap_or_else(|e| Err(DensifyError::external("tokio", e)))
                    }
                    Err(e) => Err(DensifyError::external("tokio", e)),
                };
                (source, result)
            }
        });

        let mut report = BatchReport::default();
        for (source, result) in join_all(jobs).await {
            report.absorb(source, result);
        }
        info!(
            "batch done: {} written, {} kept, {} failed",
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }
}
