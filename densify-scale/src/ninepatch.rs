// SPDX-License-Identifier: MIT
//! # Nine-Patch Geometry
//!
//! Remaps stretch/content segments defined in source pixel space onto a scaled
//! destination raster, then paints them as 1px black markers in the frame
//! around that raster:
//!
//! - top row: stretch segments on the x axis
//! - left column: stretch segments on the y axis
//! - bottom row: content segments on the x axis
//! - right column: content segments on the y axis
//!
//! Segments are inclusive `[start, stop]` pairs. An axis without segments is a
//! single implicit segment covering the whole axis.
//!
//! ## Boundary Guarantees
//!
//! For every segment and any ratio > 0, with `d` the destination length of the
//! axis: `0 <= start < d`, `size >= 1` and `start + size <= d`. Markers
//! therefore never reach the frame corners, which stay fully transparent.

use fast_image_resize::Resizer;

use crate::cpu::{scale_rgba_cpu, ScaleError};
use crate::plan::{build_plan, Framing, ScalePlan, Size};

/// Absorbs float noise so an exact product such as `160 * (213/160)` does not
/// round up an extra pixel.
const CEIL_EPSILON: f64 = 1e-9;

const MARKER: [u8; 4] = [0, 0, 0, 255];

/// Inclusive pixel range in source space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub stop: u32,
}

impl Segment {
    pub fn new(start: u32, stop: u32) -> Result<Self, ScaleError> {
        let seg = Self { start, stop };
        seg.validate()?;
        Ok(seg)
    }

    pub fn validate(&self) -> Result<(), ScaleError> {
        if self.stop < self.start {
            return Err(ScaleError::InvalidSegment {
                start: self.start,
                stop: self.stop,
            });
        }
        Ok(())
    }
}

/// Segments for both axes. `None` means the whole axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Zone {
    pub x: Option<Vec<Segment>>,
    pub y: Option<Vec<Segment>>,
}

impl Zone {
    pub fn validate(&self) -> Result<(), ScaleError> {
        self.x
            .iter()
            .chain(self.y.iter())
            .flatten()
            .try_for_each(Segment::validate)
    }
}

/// A remapped segment in destination pixel space (relative to the raster, not the frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub size: u32,
}

/// Scaled start of a segment, clamped to `[0, dimension - 1]`.
pub fn start(seg_start: u32, dimension: u32, ratio: f64) -> u32 {
    let scaled = (f64::from(seg_start) * ratio).floor().max(0.0);
    let last = dimension.saturating_sub(1);
    if scaled >= f64::from(last) {
        last
    } else {
        scaled as u32
    }
}

/// Scaled length of a segment, measured from [`start`] to the scaled end of
/// the segment so the whole scaled range `[s * ratio, (e + 1) * ratio)` is
/// covered. At least 1px, never past the end of the axis.
pub fn size(seg_start: u32, seg_stop: u32, dimension: u32, ratio: f64) -> u32 {
    let from = start(seg_start, dimension, ratio);
    let end = ((f64::from(seg_stop) + 1.0) * ratio - CEIL_EPSILON).ceil();
    let scaled = (end - f64::from(from)).max(1.0);
    let room = dimension.saturating_sub(from).max(1);
    if scaled >= f64::from(room) {
        room
    } else {
        scaled as u32
    }
}

/// Remap one axis worth of segments.
pub fn spans(segments: Option<&[Segment]>, dimension: u32, ratio: f64) -> Vec<Span> {
    match segments {
        Some(segs) if !segs.is_empty() => segs
            .iter()
            .map(|s| Span {
                start: start(s.start, dimension, ratio),
                size: size(s.start, s.stop, dimension, ratio),
            })
            .collect(),
        _ => vec![Span {
            start: 0,
            size: dimension.max(1),
        }],
    }
}

/// All four marker runs for one output raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    pub stretch_x: Vec<Span>,
    pub stretch_y: Vec<Span>,
    pub content_x: Vec<Span>,
    pub content_y: Vec<Span>,
}

impl Markers {
    /// `out` is the scaled raster size, excluding the frame.
    pub fn compute(stretch: &Zone, content: &Zone, out: Size, ratio: f64) -> Self {
        Self {
            stretch_x: spans(stretch.x.as_deref(), out.w, ratio),
            stretch_y: spans(stretch.y.as_deref(), out.h, ratio),
            content_x: spans(content.x.as_deref(), out.w, ratio),
            content_y: spans(content.y.as_deref(), out.h, ratio),
        }
    }
}

/// Paint markers into a framed RGBA canvas of `canvas` size.
pub fn paint_markers(dst: &mut [u8], canvas: Size, markers: &Markers) -> Result<(), ScaleError> {
    let (cw, ch) = (canvas.w as usize, canvas.h as usize);
    if cw < 3 || ch < 3 || dst.len() < cw * ch * 4 {
        return Err(ScaleError::BufferTooSmall);
    }
    let mut put = |x: usize, y: usize| {
        let off = (y * cw + x) * 4;
        dst[off..off + 4].copy_from_slice(&MARKER);
    };
    // Offsets are clamped to the inner raster so the frame corners are never touched.
    let inner = |span: &Span, len: usize| {
        let from = 1 + (span.start as usize).min(len - 1);
        let to = (1 + span.start as usize + span.size as usize).min(len + 1);
        from..to
    };
    for span in &markers.stretch_x {
        inner(span, cw - 2).for_each(|x| put(x, 0));
    }
    for span in &markers.stretch_y {
        inner(span, ch - 2).for_each(|y| put(0, y));
    }
    for span in &markers.content_x {
        inner(span, cw - 2).for_each(|x| put(x, ch - 1));
    }
    for span in &markers.content_y {
        inner(span, ch - 2).for_each(|y| put(cw - 1, y));
    }
    Ok(())
}

/// Paint the zone markers onto a canvas that was rendered with a
/// [`Framing::NinePatchBorder`] plan.
///
/// The scaled raster must already sit at (1,1); only frame pixels are written.
pub fn mark(dst: &mut [u8], plan: &ScalePlan, stretch: &Zone, content: &Zone) -> Result<(), ScaleError> {
    stretch.validate()?;
    content.validate()?;
    if plan.framing != Framing::NinePatchBorder {
        return Err(ScaleError::NotFramed);
    }
    let markers = Markers::compute(stretch, content, plan.out, plan.ratio);
    paint_markers(dst, plan.canvas, &markers)
}

/// Scale `src_rgba` by `ratio` into a freshly allocated framed canvas and mark it.
pub fn render(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    src: Size,
    ratio: f64,
    stretch: &Zone,
    content: &Zone,
) -> Result<(ScalePlan, Vec<u8>), ScaleError> {
    let plan = build_plan(src, ratio, Framing::NinePatchBorder)?;
    let mut data = vec![0u8; plan.canvas_len()];
    scale_rgba_cpu(resizer, src_rgba, src, &plan, &mut data)?;
    mark(&mut data, &plan, stretch, content)?;
    Ok((plan, data))
}
