//! # Densify
//!
//! Density-aware Android resource generation: derive every density variant of
//! an image from one source whose file name says what it is.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `qualifier`: the 19 configuration dimensions and the `-`-separated codec
//! - `density`: named buckets, constrained densities and scale ratios
//! - `resource`: a source file's logical name, qualifiers, bounds and output naming
//! - `variant`: nine-patch variant pool and best-match resolution
//! - `config`: run configuration and JSON variant loading
//! - `processing`: rasterizer seam and the concurrent batch renderer
//! - `error`: error taxonomy shared by everything above
//!
//! Pixel work (scale planning, resampling, nine-patch geometry) lives in the
//! `densify_scale` crate.
//!
//! ## Example
//!
//! ```rust
//! use densify::{ConfigVariant, DensityBucket, ResourceDescriptor, VariantPool, Zone};
//!
//! # fn example() -> densify::DensifyResult<()> {
//! let mut builder = VariantPool::builder();
//! builder
//!     .add(ConfigVariant::new("button", None, "", Zone::default(), Zone::default())?)
//!     .add(ConfigVariant::new("button_land", Some("button".into()), "land", Zone::default(), Zone::default())?);
//! let pool = builder.build()?;
//!
//! let res = ResourceDescriptor::from_path("button-land-hdpi.png")?;
//! assert_eq!(pool.best_match_for(&res).map(|v| v.name()), Some("button_land"));
//! assert_eq!(res.output_dir(Default::default(), DensityBucket::Xxhdpi), "drawable-land-xxhdpi");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod density;
pub mod error;
pub mod processing;
pub mod qualifier;
pub mod resource;
pub mod variant;

pub use config::{OverrideMode, RenderConfig, VariantRecord};
pub use density::{Axis, Density, DensityBucket};
pub use densify_scale::ninepatch::{Segment, Zone};
pub use error::{DensifyError, DensifyResult, ErrorContext, ErrorSeverity};
pub use processing::{BatchRenderer, BatchReport, PngRasterizer, Rasterizer};
pub use qualifier::{QualifiedAttributes, QualifiedName, QualifierDimension};
pub use resource::{OutputCategory, ResourceDescriptor};
pub use variant::{ConfigVariant, VariantPool};
