//! Normalized Euclidean distance transform for watershed seeding.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::euclidean_squared_distance_transform;

/// Distance-to-nearest-background grid, min-max normalized to [0, 1].
pub type DistanceMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Compute each foreground pixel's Euclidean distance to the nearest
/// background pixel, scaled so the largest distance is 1.0.
///
/// Degenerate inputs stay well defined: an empty mask maps to all zeros and
/// a mask with no background at all maps to all ones.
pub fn normalized_distance_transform(mask: &GrayImage) -> DistanceMap {
    let (width, height) = mask.dimensions();
    let mut out = DistanceMap::new(width, height);

    let any_foreground = mask.pixels().any(|p| p[0] > 0);
    let any_background = mask.pixels().any(|p| p[0] == 0);
    if !any_foreground {
        return out;
    }
    if !any_background {
        for pixel in out.pixels_mut() {
            pixel[0] = 1.0;
        }
        return out;
    }

    // The transform measures distance to the nearest positive pixel, so feed
    // it the inverted mask to get distance-to-background.
    let inverted = GrayImage::from_fn(width, height, |x, y| {
        if mask.get_pixel(x, y)[0] > 0 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    let squared = euclidean_squared_distance_transform(&inverted);

    let mut max_distance = 0.0f32;
    for (x, y, pixel) in squared.enumerate_pixels() {
        let distance = (pixel[0] as f32).sqrt();
        out.put_pixel(x, y, Luma([distance]));
        if distance > max_distance {
            max_distance = distance;
        }
    }
    if max_distance > 0.0 {
        for pixel in out.pixels_mut() {
            pixel[0] /= max_distance;
        }
    }
    out
}
