//! Shared helpers for the densify integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Write a solid, fully opaque PNG source and return its path.
pub fn write_source(dir: &Path, file_name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(file_name);
    RgbaImage::from_pixel(w, h, Rgba([40, 120, 200, 255]))
        .save(&path)
        .expect("write source png");
    path
}

pub fn write_ninepatch_config(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("ninepatch.json");
    std::fs::write(&path, json).expect("write ninepatch config");
    path
}

pub fn open_rgba(path: &Path) -> RgbaImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("open {}: {}", path.display(), e))
        .to_rgba8()
}

pub fn alpha(img: &RgbaImage, x: u32, y: u32) -> u8 {
    img.get_pixel(x, y).0[3]
}

/// Whether the pixel is an opaque black nine-patch marker.
pub fn is_marker(img: &RgbaImage, x: u32, y: u32) -> bool {
    img.get_pixel(x, y).0 == [0, 0, 0, 255]
}

/// Marked (start, size) runs along a frame row or column.
pub fn runs(img: &RgbaImage, along_x: bool, fixed: u32) -> Vec<(u32, u32)> {
    let len = if along_x { img.width() } else { img.height() };
    let mut out = Vec::new();
    let mut current: Option<(u32, u32)> = None;
    for i in 0..len {
        let (x, y) = if along_x { (i, fixed) } else { (fixed, i) };
        if is_marker(img, x, y) {
            current = Some(match current {
                Some((start, size)) => (start, size + 1),
                None => (i, 1),
            });
        } else if let Some(run) = current.take() {
            out.push(run);
        }
    }
    out.extend(current);
    out
}
