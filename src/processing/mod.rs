//! # Processing Module
//!
//! The rasterizer seam and the concurrent batch render pipeline.

pub mod batch;
pub mod rasterizer;

pub use batch::{render_resource, BatchRenderer, BatchReport, ResourceOutcome};
pub use rasterizer::{PngRasterizer, Rasterizer, SourceImage};
