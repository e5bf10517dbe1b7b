//! # Configuration Module
//!
//! Run parameters for batch rendering and loading of nine-patch variant
//! definitions.

pub mod ninepatch;
pub mod render;

pub use ninepatch::{VariantRecord, ZoneRecord};
pub use render::{OverrideMode, RenderConfig};
