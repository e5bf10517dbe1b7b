//! # Nine-Patch Variant Configuration
//!
//! Variant definitions are read from a JSON array:
//!
//! ```json
//! [
//!   { "name": "button", "stretch": { "x": [[4, 11]], "y": [[4, 11]] } },
//!   {
//!     "name": "button_land",
//!     "pattern": "btn_.*",
//!     "qualifiers": "land",
//!     "stretch": { "x": [[2, 5], [10, 13]] },
//!     "content": { "x": [[2, 13]], "y": [[2, 13]] }
//!   }
//! ]
//! ```
//!
//! Omitted axes cover the whole raster. Records are validated when turned into
//! a [`VariantPool`], so a bad segment or pattern anywhere fails the load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use densify_scale::ninepatch::{Segment, Zone};
use serde::Deserialize;

use crate::error::{DensifyError, DensifyResult};
use crate::variant::{ConfigVariant, VariantPool};

/// Axis segments as written in JSON: `[[start, stop], ...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ZoneRecord {
    #[serde(default)]
    pub x: Option<Vec<[i64; 2]>>,
    #[serde(default)]
    pub y: Option<Vec<[i64; 2]>>,
}

/// One entry of the variant configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VariantRecord {
    pub name: String,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub qualifiers: String,
    #[serde(default)]
    pub stretch: ZoneRecord,
    #[serde(default)]
    pub content: ZoneRecord,
}

impl ZoneRecord {
    fn to_zone(&self, variant: &str, field: &str) -> DensifyResult<Zone> {
        let axis = |pairs: &Option<Vec<[i64; 2]>>, axis_name: &str| -> DensifyResult<Option<Vec<Segment>>> {
            let Some(pairs) = pairs else {
                return Ok(None);
            };
            pairs
                .iter()
                .map(|&[start, stop]| -> DensifyResult<Segment> {
                    let coord = |v: i64| {
                        u32::try_from(v).map_err(|_| {
                            DensifyError::config(
                                format!("{}.{}.{}", variant, field, axis_name),
                                v.to_string(),
                                "segment coordinates must be non-negative 32-bit integers",
                            )
                        })
                    };
                    let (start, stop) = (coord(start)?, coord(stop)?);
                    Segment::new(start, stop)
                        .map_err(|_| DensifyError::invalid_zone(variant, start, stop))
                })
                .collect::<DensifyResult<Vec<_>>>()
                .map(Some)
        };
        Ok(Zone {
            x: axis(&self.x, "x")?,
            y: axis(&self.y, "y")?,
        })
    }
}

impl VariantRecord {
    pub fn to_variant(&self) -> DensifyResult<ConfigVariant> {
        ConfigVariant::new(
            self.name.clone(),
            self.pattern.clone(),
            &self.qualifiers,
            self.stretch.to_zone(&self.name, "stretch")?,
            self.content.to_zone(&self.name, "content")?,
        )
    }
}

pub fn load_from_str(json: &str) -> DensifyResult<Vec<VariantRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_from_reader(reader: impl Read) -> DensifyResult<Vec<VariantRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_from_path(path: impl AsRef<Path>) -> DensifyResult<Vec<VariantRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        DensifyError::io("open_ninepatch_config", e).with_path(path)
    })?;
    load_from_reader(BufReader::new(file))
        .map_err(|e| e.with_metadata("path", path.display().to_string()))
}

impl VariantPool {
    /// Build a frozen pool from loaded records, preserving their order.
    pub fn from_records(records: &[VariantRecord]) -> DensifyResult<Self> {
        let mut builder = Self::builder();
        for record in records {
            builder.add(record.to_variant()?);
        }
        builder.build()
    }

    /// Load and build in one step.
    pub fn from_path(path: impl AsRef<Path>) -> DensifyResult<Self> {
        let records = load_from_path(path)?;
        log::debug!("loaded {} nine-patch variant records", records.len());
        Self::from_records(&records)
    }
}
