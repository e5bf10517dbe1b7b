//! Variant pool: an insertion-ordered, read-only index from name pattern to
//! the variants sharing that pattern.
//!
//! Built once through [`VariantPoolBuilder`], then shared (typically behind an
//! `Arc`) by any number of concurrent readers.

use std::collections::HashMap;

use densify_scale::ninepatch::Zone;
use densify_scale::cpu::ScaleError;
use log::warn;
use regex::Regex;

use crate::error::{DensifyError, DensifyResult};
use crate::qualifier::{self, QualifiedAttributes, QualifierDimension};

/// A nine-patch definition that applies to resources whose logical name
/// matches `pattern` and whose qualifiers agree with `qualifiers`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigVariant {
    name: String,
    pattern: String,
    qualifiers: QualifiedAttributes,
    stretch: Zone,
    content: Zone,
}

impl ConfigVariant {
    /// `pattern` defaults to an exact match on `name`. Density in `qualifiers`
    /// is discarded since it never takes part in matching.
    pub fn new(
        name: impl Into<String>,
        pattern: Option<String>,
        qualifiers: &str,
        stretch: Zone,
        content: Zone,
    ) -> DensifyResult<Self> {
        let name = name.into();
        for zone in [&stretch, &content] {
            zone.validate().map_err(|e| match e {
                ScaleError::InvalidSegment { start, stop } => {
                    DensifyError::invalid_zone(name.clone(), start, stop)
                }
                other => other.into(),
            })?;
        }
        let pattern = pattern.unwrap_or_else(|| regex::escape(&name));
        let qualifiers = qualifier::parse(qualifiers).without(QualifierDimension::Density);
        Ok(Self {
            name,
            pattern,
            qualifiers,
            stretch,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regular expression the whole logical name must match.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn qualifiers(&self) -> &QualifiedAttributes {
        &self.qualifiers
    }

    pub fn stretch(&self) -> &Zone {
        &self.stretch
    }

    pub fn content(&self) -> &Zone {
        &self.content
    }
}

#[derive(Debug)]
struct PoolEntry {
    pattern: String,
    matcher: Regex,
    variants: Vec<ConfigVariant>,
}

/// Frozen variant index.
#[derive(Debug, Default)]
pub struct VariantPool {
    entries: Vec<PoolEntry>,
}

impl VariantPool {
    pub fn builder() -> VariantPoolBuilder {
        VariantPoolBuilder::default()
    }

    /// Number of distinct pattern keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }

    /// Variants stored under exactly `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&[ConfigVariant]> {
        self.entries
            .iter()
            .find(|e| e.pattern == pattern)
            .map(|e| e.variants.as_slice())
    }

    /// All variants whose pattern matches the whole of `name`, in insertion order.
    pub fn candidates<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a ConfigVariant> + use<'a, 'n> {
        self.entries
            .iter()
            .filter(move |e| e.matcher.is_match(name))
            .flat_map(|e| e.variants.iter())
    }
}

/// Collects variants, merging those that share a pattern key.
#[derive(Debug, Default)]
pub struct VariantPoolBuilder {
    keys: Vec<String>,
    groups: HashMap<String, Vec<ConfigVariant>>,
}

impl VariantPoolBuilder {
    pub fn add(&mut self, variant: ConfigVariant) -> &mut Self {
        let key = variant.pattern().to_string();
        if !self.groups.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.groups.entry(key).or_default().push(variant);
        self
    }

    /// Compile patterns and freeze.
    pub fn build(mut self) -> DensifyResult<VariantPool> {
        let mut entries = Vec::with_capacity(self.keys.len());
        for pattern in self.keys {
            let matcher = Regex::new(&format!("^(?:{})$", pattern))
                .map_err(|e| DensifyError::invalid_pattern(pattern.clone(), e))?;
            let variants = self.groups.remove(&pattern).unwrap_or_default();

            let unqualified: Vec<&str> = variants
                .iter()
                .filter(|v| v.qualifiers().is_empty())
                .map(ConfigVariant::name)
                .collect();
            if unqualified.len() > 1 {
                warn!(
                    "pattern '{}' has {} unqualified variants ({}); '{}' takes precedence",
                    pattern,
                    unqualified.len(),
                    unqualified.join(", "),
                    unqualified[0]
                );
            }

            entries.push(PoolEntry {
                pattern,
                matcher,
                variants,
            });
        }
        Ok(VariantPool { entries })
    }
}
