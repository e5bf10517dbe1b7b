use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use densify::config::{OverrideMode, RenderConfig};
use densify::density::DensityBucket;
use densify::processing::{BatchRenderer, PngRasterizer};
use densify::resource::{OutputCategory, ResourceDescriptor};
use densify::variant::VariantPool;

/// Generate every density variant of an Android image resource from one
/// qualified source file.
#[derive(Parser, Debug)]
#[command(name = "densify", version)]
#[command(about = "Density-aware Android resource generation")]
#[command(long_about = "Reads sources named <name>-<qualifiers>-<density>.png (e.g. icon-land-w48mdpi.png),
resolves nine-patch variants and writes drawable/mipmap trees for each target density.")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how resource file names are understood
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show which nine-patch variant each file resolves to
    Resolve {
        /// Nine-patch variant definitions (JSON)
        #[arg(long)]
        ninepatch: PathBuf,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Render sources at the target densities
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Nine-patch variant definitions (JSON)
    #[arg(long)]
    ninepatch: Option<PathBuf>,

    /// Root of the generated resource tree
    #[arg(short, long, default_value = "res")]
    out: PathBuf,

    /// Target densities, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',',
          default_values_t = RenderConfig::default().targets)]
    targets: Vec<DensityBucket>,

    #[arg(short, long, value_enum, default_value_t = OutputCategory::Drawable)]
    category: OutputCategory,

    /// Also write this target to the density-less directory
    #[arg(long, value_enum)]
    fallback: Option<DensityBucket>,

    /// What to do with outputs that already exist
    #[arg(long = "override", value_enum, default_value_t = OverrideMode::Always)]
    override_mode: OverrideMode,

    /// Resources rendered concurrently (defaults to the number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let ok = match cli.command {
        Command::Parse { files } => parse(&files),
        Command::Resolve { ninepatch, files } => resolve(&ninepatch, &files)?,
        Command::Render(args) => render(args).await?,
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn parse(files: &[PathBuf]) -> bool {
    let mut ok = true;
    for file in files {
        match ResourceDescriptor::from_path(file) {
            Ok(res) => {
                println!("{}", file.display());
                println!("  name:       {}", res.name());
                println!("  qualifiers: {}", res.attributes());
                println!("  density:    {} ({} dpi)", res.density(), res.density().dpi());
                for (dimension, value) in res.attributes().iter() {
                    println!("  {:<18} {}", dimension.tag(), value);
                }
            }
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                ok = false;
            }
        }
    }
    ok
}

fn resolve(ninepatch: &Path, files: &[PathBuf]) -> Result<bool> {
    let pool = VariantPool::from_path(ninepatch)
        .with_context(|| format!("loading {}", ninepatch.display()))?;
    let mut ok = true;
    for file in files {
        match ResourceDescriptor::from_path(file) {
            Ok(res) => {
                let name = pool.best_match_for(&res).map_or("none", |v| v.name());
                println!("{}\t{}", file.display(), name);
            }
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                ok = false;
            }
        }
    }
    Ok(ok)
}

async fn render(args: RenderArgs) -> Result<bool> {
    let mut config = RenderConfig::new(args.out, args.targets, args.category);
    config.fallback = args.fallback;
    config.override_mode = args.override_mode;
    config.ninepatch = args.ninepatch;
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    config.validate()?;

    let pool = match &config.ninepatch {
        Some(path) => Some(Arc::new(
            VariantPool::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        )),
        None => None,
    };

    let renderer = BatchRenderer::new(config, pool, Arc::new(PngRasterizer))?;
    let report = renderer.run(args.files).await;

    println!(
        "{} written, {} kept, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );
    for (source, error) in &report.failed {
        eprintln!("  {}: {}", source.display(), error);
        if let Some(hint) = error.recovery_suggestion() {
            eprintln!("    hint: {}", hint);
        }
    }
    Ok(report.is_success())
}
