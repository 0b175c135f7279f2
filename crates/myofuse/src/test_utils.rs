//! Shared helpers for image-based unit tests.

use image::{GrayImage, Luma};

/// Fill the axis-aligned rectangle with top-left (x, y) and size w×h.
pub(crate) fn draw_filled_rect(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32, value: u8) {
    let (width, height) = img.dimensions();
    for yy in y..(y + h).min(height) {
        for xx in x..(x + w).min(width) {
            img.put_pixel(xx, yy, Luma([value]));
        }
    }
}

/// Fill the disc of the given radius centered on (cx, cy).
pub(crate) fn draw_disc(img: &mut GrayImage, cx: u32, cy: u32, radius: f32, value: u8) {
    let (width, height) = img.dimensions();
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx as f32;
            let dy = y as f32 - cy as f32;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

/// Count foreground (non-zero) pixels.
pub(crate) fn count_foreground(img: &GrayImage) -> usize {
    img.pixels().filter(|p| p[0] > 0).count()
}
