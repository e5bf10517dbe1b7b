//! # Variant Module
//!
//! Named, qualifier-tagged configuration variants (nine-patch zone
//! definitions), the frozen pool that indexes them by name pattern, and the
//! best-match resolver.

pub mod pool;
pub mod resolver;

pub use pool::{ConfigVariant, VariantPool, VariantPoolBuilder};
