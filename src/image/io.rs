//! I/O helpers for grayscale images, segment overlays and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `save_overlay`: draw traced segments over the source image and save it.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageU8, ImageView};
use crate::segments::Segment;
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

const OVERLAY_PALETTE: [[u8; 3]; 6] = [
    [230, 25, 75],
    [60, 180, 75],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
];

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8::new(self.width, self.height, &self.data)
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Render `segments` as colored polylines over a dimmed copy of `background`.
pub fn render_overlay(background: &ImageU8<'_>, segments: &[Segment]) -> RgbImage {
    let mut out = RgbImage::new(background.width() as u32, background.height() as u32);
    for (y, row) in background.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = 128 + px / 2;
            out.put_pixel(x as u32, y as u32, Rgb([v, v, v]));
        }
    }
    for (i, segment) in segments.iter().enumerate() {
        let color = Rgb(OVERLAY_PALETTE[i % OVERLAY_PALETTE.len()]);
        let anchors: Vec<_> = segment.anchors().collect();
        if let [only] = anchors.as_slice() {
            put_checked(&mut out, only.x as f32, only.y as f32, color);
        }
        for pair in anchors.windows(2) {
            draw_line(
                &mut out,
                [pair[0].x as f32, pair[0].y as f32],
                [pair[1].x as f32, pair[1].y as f32],
                color,
            );
        }
    }
    out
}

/// Render and save an overlay PNG, creating parent directories.
pub fn save_overlay(background: &ImageU8<'_>, segments: &[Segment], path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    render_overlay(background, segments)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn draw_line(out: &mut RgbImage, p0: [f32; 2], p1: [f32; 2], color: Rgb<u8>) {
    let dx = p1[0] - p0[0];
    let dy = p1[1] - p0[1];
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        put_checked(out, p0[0] + dx * t, p0[1] + dy * t, color);
    }
}

fn put_checked(out: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let (x, y) = (x.round(), y.round());
    if x >= 0.0 && y >= 0.0 && (x as u32) < out.width() && (y as u32) < out.height() {
        out.put_pixel(x as u32, y as u32, color);
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
