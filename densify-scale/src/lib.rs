// SPDX-License-Identifier: MIT
//! # densify-scale: Density Scaling and Nine-Patch Geometry
//!
//! This crate holds the pixel side of densify. It knows nothing about
//! resource names or qualifiers: callers hand it a source raster, a scale
//! ratio and (for nine-patches) the stretch/content zones in source pixel
//! space, and get back a scaled raster in destination pixel space.
//!
//! ## Key Components
//!
//! - [`plan`]: Output size computation from a density ratio, optionally framed
//!   by the 1px nine-patch border
//! - [`cpu`]: CPU-based RGBA scaling using SIMD acceleration
//! - [`ninepatch`]: Segment remapping (`start`/`size`) and border marker painting
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use densify_scale::{cpu::scale_rgba_cpu, plan::{build_plan, Framing, Size}};
//!
//! # fn main() -> Result<(), densify_scale::cpu::ScaleError> {
//! let input = Size { w: 48, h: 48 };
//! // mdpi -> xhdpi
//! let plan = build_plan(input, 2.0, Framing::Plain)?;
//!
//! let src = vec![0u8; 48 * 48 * 4];
//! let mut resizer = fast_image_resize::Resizer::new();
//! let mut output = vec![0u8; plan.canvas_len()];
//! scale_rgba_cpu(&mut resizer, &src, input, &plan, &mut output)?;
//! assert_eq!(plan.out.w, 96);
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod ninepatch;
pub mod plan;
