// SPDX-License-Identifier: MIT
//! # Scale Plan Computation
//!
//! Computes the output geometry for rendering a source raster at a target
//! density. The caller supplies a single scalar ratio (already derived from
//! source and target densities); both axes are multiplied by it, so aspect
//! ratio is preserved implicitly.
//!
//! ## Framing
//!
//! - **Plain**: the canvas is exactly the scaled raster.
//! - **NinePatchBorder**: the canvas is 2px larger on each axis and the scaled
//!   raster is placed at (1,1), leaving a 1px frame for stretch/content markers.
//!
//! Output sizes are rounded and clamped to a minimum of 1px, so a tiny source
//! rendered at a much lower density never collapses to an empty image.

use crate::cpu::ScaleError;

/// Largest canvas side `build_plan` will produce, frame included.
pub const MAX_CANVAS_SIDE: u32 = 32_768;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// Rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Rectangle anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0,
            y: 0,
            w: size.w,
            h: size.h,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }
}

/// How the scaled raster is placed on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    /// Canvas equals the scaled raster.
    Plain,
    /// Canvas has a transparent 1px frame on every side for nine-patch markers.
    NinePatchBorder,
}

/// Complete scaling plan computed from input parameters.
#[derive(Clone, Copy, Debug)]
pub struct ScalePlan {
    /// Original input dimensions
    pub input: Size,
    /// Uniform scale ratio applied to both axes
    pub ratio: f64,
    /// Scaled raster dimensions (without any frame)
    pub out: Size,
    /// Full output canvas dimensions
    pub canvas: Size,
    /// Where the scaled raster lands on the canvas when framed.
    /// Format: (x, y, width, height) in canvas coordinate space.
    pub dst_roi: Option<(u32, u32, u32, u32)>,
    pub framing: Framing,
}

impl ScalePlan {
    /// Byte length of an RGBA buffer holding the whole canvas.
    pub fn canvas_len(&self) -> usize {
        (self.canvas.w as usize) * (self.canvas.h as usize) * 4
    }
}

/// Compute a scaling plan for `input` at `ratio`.
///
/// # Errors
/// - [`ScaleError::InvalidRatio`] if the ratio is not a finite positive number.
/// - [`ScaleError::OutputTooLarge`] if either canvas side would exceed
///   [`MAX_CANVAS_SIDE`].
pub fn build_plan(input: Size, ratio: f64, framing: Framing) -> Result<ScalePlan, ScaleError> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ScaleError::InvalidRatio(ratio));
    }
    let out = scaled_size(input, ratio);
    let frame = match framing {
        Framing::Plain => 0,
        Framing::NinePatchBorder => 2,
    };
    if out.w > MAX_CANVAS_SIDE - frame || out.h > MAX_CANVAS_SIDE - frame {
        return Err(ScaleError::OutputTooLarge { w: out.w, h: out.h });
    }
    let plan = match framing {
        Framing::Plain => ScalePlan {
            input,
            ratio,
            out,
            canvas: out,
            dst_roi: None,
            framing,
        },
        Framing::NinePatchBorder => ScalePlan {
            input,
            ratio,
            out,
            canvas: Size {
                w: out.w + 2,
                h: out.h + 2,
            },
            dst_roi: Some((1, 1, out.w, out.h)),
            framing,
        },
    };
    Ok(plan)
}

/// Scale both axes by `ratio`, rounding to the nearest pixel, never below 1px.
pub fn scaled_size(input: Size, ratio: f64) -> Size {
    let (w, h) = (input.w as f64, input.h as f64);
    Size {
        w: ((w * ratio).round() as u32).max(1),
        h: ((h * ratio).round() as u32).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_plan_scales_both_axes() {
        let plan = build_plan(Size { w: 48, h: 32 }, 1.5, Framing::Plain).unwrap();
        assert_eq!(plan.out, Size { w: 72, h: 48 });
        assert_eq!(plan.canvas, plan.out);
        assert!(plan.dst_roi.is_none());
        assert_eq!(plan.canvas_len(), 72 * 48 * 4);
    }

    #[test]
    fn ninepatch_plan_adds_one_pixel_frame() {
        let plan = build_plan(Size { w: 10, h: 20 }, 2.0, Framing::NinePatchBorder).unwrap();
        assert_eq!(plan.out, Size { w: 20, h: 40 });
        assert_eq!(plan.canvas, Size { w: 22, h: 42 });
        assert_eq!(plan.dst_roi, Some((1, 1, 20, 40)));
    }

    #[test]
    fn tiny_outputs_clamp_to_one_pixel() {
        assert_eq!(scaled_size(Size { w: 1, h: 3 }, 0.1), Size { w: 1, h: 1 });
    }

    #[test]
    fn oversized_outputs_are_rejected_not_wrapped() {
        let one = Size { w: 1, h: 1 };
        for framing in [Framing::Plain, Framing::NinePatchBorder] {
            let err = build_plan(one, f64::from(u32::MAX), framing).unwrap_err();
            assert!(matches!(err, ScaleError::OutputTooLarge { .. }), "{:?}", framing);
        }

        let edge = Size { w: MAX_CANVAS_SIDE - 2, h: 1 };
        let plan = build_plan(edge, 1.0, Framing::NinePatchBorder).unwrap();
        assert_eq!(plan.canvas.w, MAX_CANVAS_SIDE);
        assert!(build_plan(Size { w: MAX_CANVAS_SIDE - 1, h: 1 }, 1.0, Framing::NinePatchBorder).is_err());
        assert!(build_plan(Size { w: MAX_CANVAS_SIDE, h: 1 }, 1.0, Framing::Plain).is_ok());
    }

    #[test]
    fn rejects_non_positive_ratio() {
        let input = Size { w: 4, h: 4 };
        assert!(matches!(
            build_plan(input, 0.0, Framing::Plain),
            Err(ScaleError::InvalidRatio(_))
        ));
        assert!(build_plan(input, f64::NAN, Framing::Plain).is_err());
        assert!(build_plan(input, -1.0, Framing::Plain).is_err());
    }
}
