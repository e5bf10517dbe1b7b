//! # Resource Descriptor
//!
//! A source file together with everything derived from its name: logical
//! name, typed qualifiers and density. Raster sources also carry their
//! bounding box once it has been measured.
//!
//! ## Output Naming
//!
//! Outputs go to `<category>[-qualifiers]/<name>[.9].png`, where the
//! qualifiers are the source's own with density replaced by the target
//! bucket, in canonical order:
//!
//! ```rust
//! use densify::density::DensityBucket;
//! use densify::resource::{OutputCategory, ResourceDescriptor};
//!
//! let res = ResourceDescriptor::from_path("art/button-land-w48mdpi.png").unwrap();
//! assert_eq!(res.output_dir(OutputCategory::Drawable, DensityBucket::Xhdpi), "drawable-land-xhdpi");
//! assert_eq!(res.output_file(true), "button.9.png");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use densify_scale::plan::{scaled_size, Rect, Size};

use crate::density::{Density, DensityBucket};
use crate::error::{DensifyError, DensifyResult};
use crate::qualifier::{parse_resource_name, QualifiedAttributes, QualifierDimension};

/// Reserved marker Android uses to recognize nine-patch files.
pub const NINE_PATCH_MARKER: &str = ".9";

/// Top-level resource directory family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputCategory {
    #[default]
    Drawable,
    Mipmap,
}

impl OutputCategory {
    pub fn name(self) -> &'static str {
        match self {
            Self::Drawable => "drawable",
            Self::Mipmap => "mipmap",
        }
    }
}

impl fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceDescriptor {
    path: PathBuf,
    name: String,
    attributes: QualifiedAttributes,
    density: Density,
    bounds: Option<Rect>,
}

impl ResourceDescriptor {
    /// Describe the file at `path` from its name alone.
    ///
    /// Everything after the first `.` of the file name is treated as extension,
    /// so `icon-hdpi.9.png` describes `icon` at hdpi.
    pub fn from_path(path: impl Into<PathBuf>) -> DensifyResult<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DensifyError::invalid_resource_name(
                    path.display().to_string(),
                    "file name is missing or not valid UTF-8",
                )
            })?;
        let base = file_name.split('.').next().unwrap_or_default();
        let parsed = parse_resource_name(base)
            .map_err(|e| e.with_metadata("path", path.display().to_string()))?;
        Ok(Self {
            path,
            name: parsed.name,
            attributes: parsed.attributes,
            density: parsed.density,
            bounds: None,
        })
    }

    /// Attach the measured source bounding box.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical name without qualifiers or extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &QualifiedAttributes {
        &self.attributes
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Scale ratio from this source to `target`.
    pub fn ratio(&self, target: DensityBucket) -> DensifyResult<f64> {
        let bounds = self.require_bounds()?;
        self.density.ratio(bounds, target)
    }

    /// Output raster size at `target` (without any nine-patch frame).
    pub fn scaled_size(&self, target: DensityBucket) -> DensifyResult<Size> {
        let bounds = self.require_bounds()?;
        let ratio = self.density.ratio(bounds, target)?;
        Ok(scaled_size(bounds.size(), ratio))
    }

    /// Own qualifiers with density replaced by `target`, or removed when `None`.
    pub fn output_attributes(&self, target: Option<DensityBucket>) -> QualifiedAttributes {
        let mut attrs = self.attributes.without(QualifierDimension::Density);
        if let Some(target) = target {
            attrs.set(QualifierDimension::Density, target.name());
        }
        attrs
    }

    /// `drawable-land-xhdpi` style directory name for `target`.
    pub fn output_dir(&self, category: OutputCategory, target: DensityBucket) -> String {
        format!("{}{}", category, self.output_attributes(Some(target)))
    }

    /// Directory for the density-less fallback copy.
    pub fn fallback_dir(&self, category: OutputCategory) -> String {
        format!("{}{}", category, self.output_attributes(None))
    }

    pub fn output_file(&self, nine_patch: bool) -> String {
        let marker = if nine_patch { NINE_PATCH_MARKER } else { "" };
        format!("{}{}.png", self.name, marker)
    }

    fn require_bounds(&self) -> DensifyResult<Rect> {
        self.bounds.ok_or_else(|| {
            DensifyError::raster("measure_source", "source bounding box is not known yet")
                .with_metadata("path", self.path.display().to_string())
        })
    }
}
