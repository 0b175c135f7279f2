//! Single-channel extraction from a multi-channel source image.

use image::{GrayImage, Luma, RgbImage};

use crate::error::AnalyzeError;

/// Number of channels an input image is required to carry.
const REQUIRED_CHANNELS: usize = 3;

/// Extract one channel of a 3-channel image as an intensity grid of
/// identical width and height.
pub fn extract_channel(image: &RgbImage, channel: usize) -> Result<GrayImage, AnalyzeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalyzeError::InvalidImage(format!(
            "zero-sized image ({}x{})",
            width, height
        )));
    }
    if channel >= REQUIRED_CHANNELS {
        return Err(AnalyzeError::InvalidImage(format!(
            "channel {} out of range for a {}-channel image",
            channel, REQUIRED_CHANNELS
        )));
    }

    let mut out = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        out.put_pixel(x, y, Luma([pixel[channel]]));
    }
    Ok(out)
}
