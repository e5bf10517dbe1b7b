//! # Density Model
//!
//! A resource's density is either a plain named bucket (`hdpi`) or a bucket
//! with a pixel constraint on one axis (`w48mdpi`: "48px wide at mdpi").
//!
//! ## Ratio Computation
//!
//! | source           | ratio to `target`                                   |
//! |------------------|-----------------------------------------------------|
//! | `Relative`       | `target_dpi / source_dpi`                            |
//! | `Constrained`    | `size / bounds_on_axis * target_dpi / source_dpi`    |
//!
//! The ratio is a single scalar applied to both axes, so the unconstrained
//! axis follows the constrained one and aspect ratio is preserved.

use std::fmt;
use std::str::FromStr;

use densify_scale::plan::Rect;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DensifyError, DensifyResult};

static DENSITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([wh])(\d+))?(ldpi|mdpi|tvdpi|hdpi|xhdpi|xxhdpi|xxxhdpi)$")
        .expect("static pattern")
});

/// Named density bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum DensityBucket {
    Ldpi,
    Mdpi,
    Tvdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl DensityBucket {
    pub const ALL: [DensityBucket; 7] = [
        Self::Ldpi,
        Self::Mdpi,
        Self::Tvdpi,
        Self::Hdpi,
        Self::Xhdpi,
        Self::Xxhdpi,
        Self::Xxxhdpi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ldpi => "ldpi",
            Self::Mdpi => "mdpi",
            Self::Tvdpi => "tvdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Dots per inch; always strictly positive.
    pub fn dpi(self) -> u32 {
        match self {
            Self::Ldpi => 120,
            Self::Mdpi => 160,
            Self::Tvdpi => 213,
            Self::Hdpi => 240,
            Self::Xhdpi => 320,
            Self::Xxhdpi => 480,
            Self::Xxxhdpi => 640,
        }
    }
}

impl fmt::Display for DensityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DensityBucket {
    type Err = DensifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| DensifyError::invalid_qualifier(s, "unknown density bucket"))
    }
}

/// Axis a constrained density pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    fn prefix(self) -> char {
        match self {
            Self::Width => 'w',
            Self::Height => 'h',
        }
    }
}

/// Density of a source resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Density {
    Relative(DensityBucket),
    Constrained {
        bucket: DensityBucket,
        axis: Axis,
        /// Target pixel length on `axis` at `bucket`; always positive.
        size: u32,
    },
}

impl Density {
    pub fn bucket(&self) -> DensityBucket {
        match self {
            Self::Relative(bucket) => *bucket,
            Self::Constrained { bucket, .. } => *bucket,
        }
    }

    pub fn dpi(&self) -> u32 {
        self.bucket().dpi()
    }

    /// Scale factor from a source of this density with `bounds` to `target`.
    pub fn ratio(&self, bounds: Rect, target: DensityBucket) -> DensifyResult<f64> {
        let dpi_ratio = f64::from(target.dpi()) / f64::from(self.dpi());
        match self {
            Self::Relative(_) => Ok(dpi_ratio),
            Self::Constrained { axis, size, .. } => {
                let source = match axis {
                    Axis::Width => bounds.w,
                    Axis::Height => bounds.h,
                };
                if source == 0 {
                    return Err(DensifyError::invalid_qualifier(
                        self.to_string(),
                        "source has zero extent on the constrained axis",
                    ));
                }
                Ok(f64::from(*size) / f64::from(source) * dpi_ratio)
            }
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(bucket) => write!(f, "{}", bucket),
            Self::Constrained { bucket, axis, size } => {
                write!(f, "{}{}{}", axis.prefix(), size, bucket)
            }
        }
    }
}

impl FromStr for Density {
    type Err = DensifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DENSITY
            .captures(s)
            .ok_or_else(|| DensifyError::invalid_qualifier(s, "not a density qualifier"))?;
        let bucket: DensityBucket = caps[3].parse()?;
        let (Some(axis), Some(size)) = (caps.get(1), caps.get(2)) else {
            return Ok(Self::Relative(bucket));
        };
        let axis = if axis.as_str() == "w" {
            Axis::Width
        } else {
            Axis::Height
        };
        let size: u32 = size.as_str().parse().map_err(|_| {
            DensifyError::invalid_qualifier(s, "constrained size does not fit in 32 bits")
        })?;
        if size == 0 {
            return Err(DensifyError::invalid_qualifier(
                s,
                "constrained size must be positive",
            ));
        }
        Ok(Self::Constrained { bucket, axis, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(w: u32, h: u32) -> Rect {
        Rect { x: 0, y: 0, w, h }
    }

    #[test]
    fn parses_relative_and_constrained() {
        assert_eq!("xhdpi".parse::<Density>().unwrap(), Density::Relative(DensityBucket::Xhdpi));
        assert_eq!(
            "h24hdpi".parse::<Density>().unwrap(),
            Density::Constrained {
                bucket: DensityBucket::Hdpi,
                axis: Axis::Height,
                size: 24
            }
        );
    }

    #[test]
    fn rejects_unknown_or_degenerate() {
        assert!("nodpi".parse::<Density>().is_err());
        assert!("w0mdpi".parse::<Density>().is_err());
        assert!("w99999999999mdpi".parse::<Density>().is_err());
        assert!("hdpi-land".parse::<Density>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["ldpi", "tvdpi", "w48mdpi", "h300xxxhdpi"] {
            assert_eq!(s.parse::<Density>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn relative_ratio_is_dpi_ratio() {
        let mdpi = Density::Relative(DensityBucket::Mdpi);
        assert_eq!(mdpi.ratio(bounds(10, 10), DensityBucket::Xhdpi).unwrap(), 2.0);
        assert_eq!(mdpi.ratio(bounds(10, 10), DensityBucket::Ldpi).unwrap(), 0.75);
    }

    #[test]
    fn constrained_ratio_pins_axis_then_applies_dpi() {
        let w48 = "w48mdpi".parse::<Density>().unwrap();
        let b = bounds(96, 50);
        assert_eq!(w48.ratio(b, DensityBucket::Mdpi).unwrap(), 0.5);
        assert_eq!(w48.ratio(b, DensityBucket::Xxhdpi).unwrap(), 1.5);

        let h25 = "h25hdpi".parse::<Density>().unwrap();
        assert_eq!(h25.ratio(b, DensityBucket::Hdpi).unwrap(), 0.5);
    }

    #[test]
    fn constrained_ratio_needs_extent() {
        let w48 = "w48mdpi".parse::<Density>().unwrap();
        assert!(w48.ratio(bounds(0, 10), DensityBucket::Mdpi).is_err());
    }
}
