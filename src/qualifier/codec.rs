//! # Qualifier Codec
//!
//! Parses hyphen-delimited qualifier strings into [`QualifiedAttributes`] and
//! serializes them back in canonical dimension order.
//!
//! ## Parsing Rules
//!
//! - Leading hyphens are skipped before every token.
//! - Dimensions are tried in canonical order; the first whose pattern matches
//!   the start of the remaining text (up to a hyphen or the end) wins and the
//!   scan restarts from the first dimension for what follows.
//! - A token no dimension recognizes is dropped up to the next hyphen.
//! - Only the first value seen for a dimension is kept.
//!
//! ```rust
//! use densify::qualifier::{parse, serialize};
//!
//! let attrs = parse("-en-rUS-mcc310-mnc004-xxhdpi-land");
//! assert_eq!(serialize(&attrs), "-mcc310-mnc004-en-rUS-land-xxhdpi");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::density::Density;
use crate::error::{DensifyError, DensifyResult};
use crate::qualifier::dimension::QualifierDimension;

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("static pattern"));

/// Mapping from dimension to matched value, iterated in canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QualifiedAttributes(BTreeMap<QualifierDimension, String>);

impl QualifiedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: QualifierDimension) -> Option<&str> {
        self.0.get(&dimension).map(String::as_str)
    }

    pub fn contains(&self, dimension: QualifierDimension) -> bool {
        self.0.contains_key(&dimension)
    }

    /// Record `value` unless the dimension already has one. Returns whether it was recorded.
    pub fn insert_first(&mut self, dimension: QualifierDimension, value: impl Into<String>) -> bool {
        if self.0.contains_key(&dimension) {
            return false;
        }
        self.0.insert(dimension, value.into());
        true
    }

    /// Set `value`, replacing any previous one.
    pub fn set(&mut self, dimension: QualifierDimension, value: impl Into<String>) {
        self.0.insert(dimension, value.into());
    }

    pub fn remove(&mut self, dimension: QualifierDimension) -> Option<String> {
        self.0.remove(&dimension)
    }

    /// Copy of `self` without `dimension`.
    pub fn without(&self, dimension: QualifierDimension) -> Self {
        let mut copy = self.clone();
        copy.remove(dimension);
        copy
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QualifierDimension, &str)> {
        self.0.iter().map(|(d, v)| (*d, v.as_str()))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = QualifierDimension> + '_ {
        self.0.keys().copied()
    }

    /// True if every dimension of `other` is also present here (values ignored).
    pub fn covers_dimensions_of(&self, other: &QualifiedAttributes) -> bool {
        other.0.keys().all(|d| self.0.contains_key(d))
    }

    /// True if every dimension of `other` is present here with an identical value.
    pub fn agrees_with(&self, other: &QualifiedAttributes) -> bool {
        other
            .0
            .iter()
            .all(|(d, v)| self.0.get(d).is_some_and(|mine| mine == v))
    }
}

impl fmt::Display for QualifiedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.0.values() {
            write!(f, "-{}", value)?;
        }
        Ok(())
    }
}

impl FromIterator<(QualifierDimension, String)> for QualifiedAttributes {
    fn from_iter<I: IntoIterator<Item = (QualifierDimension, String)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (d, v) in iter {
            attrs.insert_first(d, v);
        }
        attrs
    }
}

/// Parse a qualifier string such as `-land-hdpi`. Never fails: unknown
/// tokens are dropped.
pub fn parse(qualifiers: &str) -> QualifiedAttributes {
    let mut attrs = QualifiedAttributes::new();
    let mut rest = qualifiers;
    loop {
        rest = rest.trim_start_matches('-');
        if rest.is_empty() {
            break;
        }
        if let Some((dimension, len)) = QualifierDimension::find_prefix(rest) {
            let value = &rest[..len];
            if !attrs.insert_first(dimension, value) {
                debug!("ignoring repeated {} qualifier '{}'", dimension, value);
            }
            rest = &rest[len..];
            continue;
        }
        match rest.find('-') {
            Some(hyphen) => {
                debug!("dropping unrecognized qualifier '{}'", &rest[..hyphen]);
                rest = &rest[hyphen..];
            }
            None => {
                debug!("dropping unrecognized qualifier '{}'", rest);
                break;
            }
        }
    }
    attrs
}

/// Canonical `-value-value...` form; empty string for no attributes.
pub fn serialize(attributes: &QualifiedAttributes) -> String {
    attributes.to_string()
}

/// A resource base name split into logical name and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedName {
    pub name: String,
    pub attributes: QualifiedAttributes,
    pub density: Density,
}

/// Split `icon-land-hdpi` into `icon` and `{orientation: land, density: hdpi}`.
///
/// The input is a base name without extension. Fails when there is no hyphen,
/// the logical name is empty or not a word, or no density qualifier is present.
pub fn parse_resource_name(base: &str) -> DensifyResult<QualifiedName> {
    let Some((name, tail)) = base.split_once('-') else {
        return Err(DensifyError::invalid_resource_name(
            base,
            "expected <name>-<qualifiers>",
        )
        .with_recovery_suggestion("append at least a density qualifier, e.g. icon-mdpi"));
    };
    if name.is_empty() || !NAME.is_match(name) {
        return Err(DensifyError::invalid_resource_name(
            base,
            "logical name must be non-empty and contain only word characters",
        ));
    }

    let attributes = parse(tail);
    let Some(density_value) = attributes.get(QualifierDimension::Density) else {
        return Err(DensifyError::invalid_resource_name(base, "no density qualifier")
            .with_recovery_suggestion("add one of ldpi, mdpi, tvdpi, hdpi, xhdpi, xxhdpi, xxxhdpi"));
    };
    let density = density_value
        .parse::<Density>()
        .map_err(|e| e.with_context(format!("resource '{}'", base)))?;

    Ok(QualifiedName {
        name: name.to_string(),
        attributes,
        density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::DensityBucket;

    #[test]
    fn simple_parse() {
        let parsed = parse_resource_name("icon-hdpi").unwrap();
        assert_eq!(parsed.name, "icon");
        assert_eq!(parsed.attributes.len(), 1);
        assert_eq!(parsed.attributes.get(QualifierDimension::Density), Some("hdpi"));
        assert_eq!(parsed.density, Density::Relative(DensityBucket::Hdpi));
    }

    #[test]
    fn canonical_order_regardless_of_input_order() {
        let parsed = parse_resource_name("icon-en-rUS-mcc310-mnc004-xxhdpi-land").unwrap();
        assert_eq!(serialize(&parsed.attributes), "-mcc310-mnc004-en-rUS-land-xxhdpi");
    }

    #[test]
    fn unrecognized_segments_are_dropped() {
        let attrs = parse("-foo-land-bar-v21-baz");
        assert_eq!(serialize(&attrs), "-land-v21");
        assert!(parse("-zzz").is_empty());
    }

    #[test]
    fn first_value_wins_per_dimension() {
        let attrs = parse("-land-port-hdpi-mdpi");
        assert_eq!(attrs.get(QualifierDimension::Orientation), Some("land"));
        assert_eq!(attrs.get(QualifierDimension::Density), Some("hdpi"));
        assert_eq!(serialize(&attrs), "-land-hdpi");
    }

    #[test]
    fn repeated_hyphens_are_tolerated() {
        assert_eq!(serialize(&parse("--land---hdpi-")), "-land-hdpi");
    }

    #[test]
    fn round_trip_canonical_strings() {
        for s in [
            "",
            "-hdpi",
            "-mcc310-mnc004-en-rUS-land-xxhdpi",
            "-b+sr+Latn-ldrtl-sw600dp-w720dp-h1024dp-xlarge-long-round-port-television-night-w32mdpi-finger-keyssoft-qwerty-navhidden-dpad-v21",
            "-fr-notnight-xxxhdpi-notouch",
        ] {
            assert_eq!(serialize(&parse(s)), s);
        }
    }

    #[test]
    fn reparse_is_stable() {
        let once = parse("-v21-land-junk-hdpi-en");
        assert_eq!(parse(&serialize(&once)), once);
    }

    #[test]
    fn rejects_names_without_hyphen() {
        let err = parse_resource_name("icon").unwrap_err();
        assert_eq!(err.category(), "invalid_resource_name");
    }

    #[test]
    fn rejects_empty_or_non_word_names() {
        assert!(parse_resource_name("-hdpi").is_err());
        assert!(parse_resource_name("my icon-hdpi").is_err());
    }

    #[test]
    fn rejects_missing_density() {
        let err = parse_resource_name("icon-land-v21").unwrap_err();
        assert_eq!(err.category(), "invalid_resource_name");
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn constrained_density_is_recognized() {
        let parsed = parse_resource_name("logo-w96mdpi").unwrap();
        assert_eq!(parsed.attributes.get(QualifierDimension::Density), Some("w96mdpi"));
        assert!(matches!(parsed.density, Density::Constrained { size: 96, .. }));
    }

    #[test]
    fn superset_helpers() {
        let resource = parse("-land-night-hdpi");
        let candidate = parse("-land");
        assert!(resource.covers_dimensions_of(&candidate));
        assert!(resource.agrees_with(&candidate));
        assert!(!resource.agrees_with(&parse("-port")));
        assert!(resource.covers_dimensions_of(&parse("-port")));
        assert!(!candidate.covers_dimensions_of(&resource));
    }
}
