//! Binarization strategies: adaptive local-mean and global Otsu.
//!
//! Myotube fluorescence varies across the field of view, so a single global
//! cutoff under- or over-segments; the adaptive threshold compares each pixel
//! to the mean of its own neighborhood and tracks illumination drift. Nuclei
//! intensity is roughly uniform per image, so one Otsu cutoff suffices and
//! plays well with the watershed step that follows.

use image::{GrayImage, Luma};

use crate::FOREGROUND;

/// Summed-area table with one extra zero row and column, so any window sum
/// is four lookups.
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (width, height) = gray.dimensions();
    let stride = width as usize + 1;
    let mut integral = vec![0u64; stride * (height as usize + 1)];
    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += gray.as_raw()[y * width as usize + x] as u64;
            integral[(y + 1) * stride + (x + 1)] = integral[y * stride + (x + 1)] + row_sum;
        }
    }
    integral
}

/// Adaptive local-mean threshold.
///
/// A pixel becomes foreground when its intensity exceeds the mean of the
/// `block_size`×`block_size` square centered on it, minus `offset`. Windows
/// are clamped to the image bounds, so border pixels average over the
/// intersection only.
pub fn adaptive_mean_threshold(gray: &GrayImage, block_size: u32, offset: i16) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let integral = integral_image(gray);
    let stride = width as usize + 1;
    let half = (block_size / 2) as i64;

    for y in 0..height {
        for x in 0..width {
            let x0 = (x as i64 - half).max(0) as usize;
            let y0 = (y as i64 - half).max(0) as usize;
            let x1 = ((x as i64 + half).min(width as i64 - 1)) as usize;
            let y1 = ((y as i64 + half).min(height as i64 - 1)) as usize;

            let sum = integral[(y1 + 1) * stride + (x1 + 1)] + integral[y0 * stride + x0]
                - integral[y0 * stride + (x1 + 1)]
                - integral[(y1 + 1) * stride + x0];
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let threshold = sum as f64 / count - offset as f64;

            if (gray.get_pixel(x, y)[0] as f64) > threshold {
                out.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }
    out
}

/// Otsu-optimal global cutoff: the threshold maximizing between-class
/// variance over the 256-bin intensity histogram (equivalently, minimizing
/// combined intra-class variance).
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for value in gray.as_raw() {
        histogram[*value as usize] += 1;
    }
    let total = gray.as_raw().len() as f64;
    if total == 0.0 {
        return 0;
    }
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, count)| value as f64 * *count as f64)
        .sum();

    let mut background_weight = 0.0f64;
    let mut background_sum = 0.0f64;
    let mut best_threshold = 0u8;
    let mut best_variance = -1.0f64;

    for threshold in 0..256usize {
        background_weight += histogram[threshold] as f64;
        if background_weight == 0.0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0.0 {
            break;
        }
        background_sum += threshold as f64 * histogram[threshold] as f64;

        let background_mean = background_sum / background_weight;
        let foreground_mean = (weighted_sum - background_sum) / foreground_weight;
        let between_class =
            background_weight * foreground_weight * (background_mean - foreground_mean).powi(2);
        if between_class > best_variance {
            best_variance = between_class;
            best_threshold = threshold as u8;
        }
    }
    best_threshold
}

/// Binarize around a global cutoff: strictly-greater pixels become foreground.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel[0] > threshold {
            out.put_pixel(x, y, Luma([FOREGROUND]));
        }
    }
    out
}
