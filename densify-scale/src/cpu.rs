// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize (SIMD-accelerated).
// RGBA8 in → RGBA8 out, direct write into caller-provided dst canvas.

use fast_image_resize as fir;
use fir::images::{TypedCroppedImageMut, TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{ResizeOptions, Resizer};

use crate::plan::{ScalePlan, Size};

#[derive(Debug)]
pub enum ScaleError {
    BufferTooSmall,
    InvalidRatio(f64),
    OutputTooLarge { w: u32, h: u32 },
    NotFramed,
    InvalidSegment { start: u32, stop: u32 },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
    Crop(fir::CropBoxError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }
impl From<fir::CropBoxError> for ScaleError { fn from(e: fir::CropBoxError) -> Self { Self::Crop(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::BufferTooSmall => write!(f, "Output buffer too small"),
            ScaleError::NotFramed => write!(f, "Nine-patch markers need a plan with a 1px border frame"),
            ScaleError::InvalidRatio(r) => write!(f, "Scale ratio must be finite and positive (got {})", r),
            ScaleError::OutputTooLarge { w, h } => write!(
                f,
                "Scaled output {}x{} exceeds the {}px canvas limit",
                w, h, crate::plan::MAX_CANVAS_SIDE
            ),
            ScaleError::InvalidSegment { start, stop } => write!(f, "Invalid segment [{}, {}]: stop precedes start", start, stop),
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
            ScaleError::Crop(e) => write!(f, "Crop error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            ScaleError::Crop(e) => Some(e),
            _ => None,
        }
    }
}

/// Main scaling entry point.
/// `src_rgba` holds tightly packed RGBA rows of `src`.
/// `dst` must hold at least `plan.canvas_len()` bytes (RGBA). When the plan is framed,
/// the whole canvas is cleared to transparent and the raster is written into `dst_roi`.
pub fn scale_rgba_cpu(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    src: Size,
    plan: &ScalePlan,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    let dst_len = plan.canvas_len();
    if dst.len() < dst_len {
        return Err(ScaleError::BufferTooSmall);
    }

    let src_len = (src.w as usize) * (src.h as usize) * 4;
    if src_rgba.len() < src_len {
        return Err(ScaleError::BufferTooSmall);
    }
    let src_view = TypedImageRef::<U8x4>::from_buffer(src.w, src.h, &src_rgba[..src_len])?;

    // Frame pixels must start fully transparent
    if plan.dst_roi.is_some() {
        dst[..dst_len].fill(0);
    }
    let mut dst_image = TypedImage::<U8x4>::from_buffer(plan.canvas.w, plan.canvas.h, &mut dst[..dst_len])?;

    let mut dst_view_any = if let Some((x, y, w, h)) = plan.dst_roi {
        let cropped = TypedCroppedImageMut::from_ref(&mut dst_image, x, y, w, h)?;
        CroppedOrFull::Cropped(cropped)
    } else {
        CroppedOrFull::Full(dst_image)
    };

    // Alpha-aware: sources are icons with transparent edges
    let opts = ResizeOptions::new().use_alpha(true);

    match &mut dst_view_any {
        CroppedOrFull::Full(ref mut full) => resizer.resize_typed::<U8x4>(&src_view, full, &opts)?,
        CroppedOrFull::Cropped(ref mut roi) => resizer.resize_typed::<U8x4>(&src_view, roi, &opts)?,
    }

    Ok(())
}

enum CroppedOrFull<'a> {
    Full(TypedImage<'a, U8x4>),
    Cropped(TypedCroppedImageMut<'a, TypedImage<'a, U8x4>>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, Framing};

    fn solid(size: Size, px: [u8; 4]) -> Vec<u8> {
        px.iter().copied().cycle().take((size.w * size.h * 4) as usize).collect()
    }

    #[test]
    fn upscale_solid_keeps_color() {
        let input = Size { w: 4, h: 4 };
        let src = solid(input, [10, 20, 30, 255]);
        let plan = build_plan(input, 2.0, Framing::Plain).unwrap();
        let mut dst = vec![0u8; plan.canvas_len()];
        let mut resizer = Resizer::new();
        scale_rgba_cpu(&mut resizer, &src, input, &plan, &mut dst).unwrap();
        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[10, 20, 30, 255]);
        }
    }

    #[test]
    fn framed_plan_leaves_transparent_border() {
        let input = Size { w: 8, h: 6 };
        let src = solid(input, [255, 255, 255, 255]);
        let plan = build_plan(input, 1.0, Framing::NinePatchBorder).unwrap();
        let mut dst = vec![7u8; plan.canvas_len()];
        let mut resizer = Resizer::new();
        scale_rgba_cpu(&mut resizer, &src, input, &plan, &mut dst).unwrap();

        let cw = plan.canvas.w as usize;
        let alpha = |x: usize, y: usize| dst[(y * cw + x) * 4 + 3];
        for x in 0..cw {
            assert_eq!(alpha(x, 0), 0);
            assert_eq!(alpha(x, plan.canvas.h as usize - 1), 0);
        }
        assert_eq!(alpha(1, 1), 255);
        assert_eq!(alpha(8, 6), 255);
    }

    #[test]
    fn short_source_is_rejected() {
        let input = Size { w: 3, h: 3 };
        let src = vec![255u8; 3 * 3 * 4 - 1];
        let plan = build_plan(input, 1.0, Framing::Plain).unwrap();
        let mut dst = vec![0u8; plan.canvas_len()];
        let mut resizer = Resizer::new();
        let err = scale_rgba_cpu(&mut resizer, &src, input, &plan, &mut dst).unwrap_err();
        assert!(matches!(err, ScaleError::BufferTooSmall));
    }

    #[test]
    fn small_destination_is_rejected() {
        let input = Size { w: 2, h: 2 };
        let src = vec![0u8; 16];
        let plan = build_plan(input, 2.0, Framing::Plain).unwrap();
        let mut dst = vec![0u8; 4];
        let mut resizer = Resizer::new();
        let err = scale_rgba_cpu(&mut resizer, &src, input, &plan, &mut dst).unwrap_err();
        assert!(matches!(err, ScaleError::BufferTooSmall));
    }
}
