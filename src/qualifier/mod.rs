//! # Qualifier Module
//!
//! Typed resource qualifiers: the fixed dimension table and the codec that
//! turns a hyphenated qualifier tail into [`QualifiedAttributes`] and back.

pub mod codec;
pub mod dimension;

pub use codec::{parse, parse_resource_name, serialize, QualifiedAttributes, QualifiedName};
pub use dimension::QualifierDimension;
