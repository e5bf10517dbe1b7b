//! Rasterizer seam: turns a source file into pixels on a [`ScalePlan`] canvas.
//!
//! Vector formats are rendered by external tooling; the shipped
//! [`PngRasterizer`] handles raster sources only.

use std::path::Path;

use densify_scale::cpu::scale_rgba_cpu;
use densify_scale::plan::{Rect, ScalePlan, Size};
use fast_image_resize::Resizer;

use crate::error::{DensifyError, DensifyResult};

/// Decoded source pixels, tightly packed RGBA8.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixels: Vec<u8>,
    pub size: Size,
}

impl SourceImage {
    /// Bounding box of the whole image.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }
}

pub trait Rasterizer: Send + Sync {
    /// Decode the source at `path`.
    fn load(&self, path: &Path) -> DensifyResult<SourceImage>;

    /// Fill `dst` (at least `plan.canvas_len()` bytes) with `source` rendered
    /// per `plan`. Framed plans leave the 1px border fully transparent.
    fn rasterize(&self, source: &SourceImage, plan: &ScalePlan, dst: &mut [u8]) -> DensifyResult<()>;
}

/// Raster sources decoded with `image` and resampled on the CPU.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngRasterizer;

impl Rasterizer for PngRasterizer {
    fn load(&self, path: &Path) -> DensifyResult<SourceImage> {
        let decoded = image::open(path).map_err(|e| {
            DensifyError::from(e)
                .with_operation("decode_source")
                .with_metadata("path", path.display().to_string())
        })?;
        let rgba = decoded.to_rgba8();
        let size = Size {
            w: rgba.width(),
            h: rgba.height(),
        };
        if size.w == 0 || size.h == 0 {
            return Err(DensifyError::raster("decode_source", "source image is empty")
                .with_metadata("path", path.display().to_string()));
        }
        Ok(SourceImage {
            pixels: rgba.into_raw(),
            size,
        })
    }

    fn rasterize(&self, source: &SourceImage, plan: &ScalePlan, dst: &mut [u8]) -> DensifyResult<()> {
        if plan.input != source.size {
            return Err(DensifyError::raster(
                "rasterize",
                format!(
                    "plan built for {}x{} but source is {}x{}",
                    plan.input.w, plan.input.h, source.size.w, source.size.h
                ),
            ));
        }
        let mut resizer = Resizer::new();
        scale_rgba_cpu(&mut resizer, &source.pixels, source.size, plan, dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densify_scale::plan::{build_plan, Framing};

    fn solid(w: u32, h: u32) -> SourceImage {
        SourceImage {
            pixels: [200u8, 10, 10, 255].repeat((w * h) as usize),
            size: Size { w, h },
        }
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot-mdpi.png");
        image::RgbaImage::from_pixel(6, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let source = PngRasterizer.load(&path).unwrap();
        assert_eq!(source.size, Size { w: 6, h: 4 });
        assert_eq!(source.pixels.len(), 6 * 4 * 4);
        assert_eq!(&source.pixels[..4], &[1, 2, 3, 255]);
        assert_eq!(source.bounds(), Rect { x: 0, y: 0, w: 6, h: 4 });
    }

    #[test]
    fn test_load_garbage_skips_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk-mdpi.png");
        std::fs::write(&path, b"not a png").unwrap();
        let err = PngRasterizer.load(&path).unwrap_err();
        assert!(crate::error::classify::skips_resource(&err));
    }

    #[test]
    fn test_rasterize_framed_leaves_border_clear() {
        let source = solid(8, 8);
        let plan = build_plan(source.size, 1.5, Framing::NinePatchBorder).unwrap();
        let mut canvas = vec![7u8; plan.canvas_len()];
        PngRasterizer.rasterize(&source, &plan, &mut canvas).unwrap();

        assert_eq!(plan.canvas, Size { w: 14, h: 14 });
        assert_eq!(canvas[3], 0);
        let centre = ((7 * 14 + 7) * 4) as usize;
        assert_eq!(canvas[centre + 3], 255);
    }

    #[test]
    fn test_rasterize_rejects_mismatched_plan() {
        let source = solid(8, 8);
        let plan = build_plan(Size { w: 4, h: 4 }, 1.0, Framing::Plain).unwrap();
        let mut canvas = vec![0u8; plan.canvas_len()];
        let err = PngRasterizer.rasterize(&source, &plan, &mut canvas).unwrap_err();
        assert_eq!(err.category(), "raster");
    }
}
