//! Fixed-kernel smoothing applied before thresholding.
//!
//! Uses the 5-tap binomial kernel [1, 4, 6, 4, 1] / 16 applied separably in
//! x then y, which matches a 5×5 Gaussian-weighted window. Border samples
//! replicate the nearest edge pixel.

use image::{GrayImage, Luma};

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
const KERNEL_SUM: u32 = 16;
const RADIUS: i64 = 2;

/// Smooth a single-channel grid, returning a new grid of the same shape.
pub fn gaussian_smooth(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    // Horizontal pass.
    let mut tmp = vec![0u8; (width as usize) * (height as usize)];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let xi = (x as i64 + k as i64 - RADIUS).clamp(0, width as i64 - 1) as u32;
                acc += weight * gray.get_pixel(xi, y)[0] as u32;
            }
            tmp[y as usize * width as usize + x as usize] =
                ((acc + KERNEL_SUM / 2) / KERNEL_SUM) as u8;
        }
    }

    // Vertical pass.
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let yi = (y as i64 + k as i64 - RADIUS).clamp(0, height as i64 - 1) as usize;
                acc += weight * tmp[yi * width as usize + x as usize] as u32;
            }
            out.put_pixel(x, y, Luma([((acc + KERNEL_SUM / 2) / KERNEL_SUM) as u8]));
        }
    }
    out
}
