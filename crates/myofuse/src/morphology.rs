//! Binary morphology with square structuring elements.
//!
//! Windows are clamped to the image bounds: out-of-bounds samples act as
//! foreground for erosion and background for dilation, so a region touching
//! the border is not eaten away from outside the image.
//!
//! Iterated composites follow the usual convention: opening with N
//! iterations is N erosions followed by N dilations, closing is N dilations
//! followed by N erosions.

use image::{GrayImage, Luma};

use crate::FOREGROUND;

fn window_pass(mask: &GrayImage, kernel: u32, keep_if_any: bool) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut out = GrayImage::new(width, height);
    let half = (kernel / 2) as i64;

    for y in 0..height {
        for x in 0..width {
            let x0 = (x as i64 - half).max(0) as u32;
            let y0 = (y as i64 - half).max(0) as u32;
            let x1 = ((x as i64 + half).min(width as i64 - 1)) as u32;
            let y1 = ((y as i64 + half).min(height as i64 - 1)) as u32;

            let mut any = false;
            let mut all = true;
            'window: for wy in y0..=y1 {
                for wx in x0..=x1 {
                    if mask.get_pixel(wx, wy)[0] > 0 {
                        any = true;
                        if keep_if_any {
                            break 'window;
                        }
                    } else {
                        all = false;
                        if !keep_if_any {
                            break 'window;
                        }
                    }
                }
            }

            let foreground = if keep_if_any { any } else { all };
            if foreground {
                out.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }
    out
}

/// Erode: a pixel survives only if its whole `kernel`×`kernel` window is
/// foreground.
pub fn erode(mask: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = window_pass(&current, kernel, false);
    }
    current
}

/// Dilate: a pixel becomes foreground if any pixel in its window is.
pub fn dilate(mask: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = window_pass(&current, kernel, true);
    }
    current
}

/// Opening (erosion then dilation): removes speckle smaller than the kernel.
pub fn open(mask: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    dilate(&erode(mask, kernel, iterations), kernel, iterations)
}

/// Closing (dilation then erosion): bridges gaps smaller than the kernel.
pub fn close(mask: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    erode(&dilate(mask, kernel, iterations), kernel, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{count_foreground, draw_filled_rect};

    #[test]
    fn erode_shrinks_a_square_by_one_pixel_per_side() {
        let mut mask = GrayImage::new(20, 20);
        draw_filled_rect(&mut mask, 5, 5, 10, 10, FOREGROUND);

        let eroded = erode(&mask, 3, 1);
        assert_eq!(count_foreground(&eroded), 8 * 8);
        assert_eq!(eroded.get_pixel(5, 5)[0], 0, "old corner is gone");
        assert_eq!(eroded.get_pixel(6, 6)[0], FOREGROUND);
    }

    #[test]
    fn dilate_restores_an_eroded_square() {
        let mut mask = GrayImage::new(20, 20);
        draw_filled_rect(&mut mask, 5, 5, 10, 10, FOREGROUND);

        let restored = dilate(&erode(&mask, 3, 1), 3, 1);
        assert_eq!(count_foreground(&restored), 100);
        assert_eq!(restored.get_pixel(5, 5)[0], FOREGROUND);
    }

    #[test]
    fn open_removes_isolated_speckle_but_keeps_large_regions() {
        let mut mask = GrayImage::new(30, 30);
        draw_filled_rect(&mut mask, 4, 4, 10, 10, FOREGROUND);
        mask.put_pixel(25, 25, Luma([FOREGROUND]));

        let opened = open(&mask, 3, 1);
        assert_eq!(opened.get_pixel(25, 25)[0], 0, "speckle removed");
        assert_eq!(count_foreground(&opened), 100, "square intact");
    }

    #[test]
    fn close_fills_a_small_interior_hole() {
        let mut mask = GrayImage::new(30, 30);
        draw_filled_rect(&mut mask, 5, 5, 14, 14, FOREGROUND);
        mask.put_pixel(11, 11, Luma([0]));
        mask.put_pixel(12, 11, Luma([0]));

        let closed = close(&mask, 5, 2);
        assert_eq!(closed.get_pixel(11, 11)[0], FOREGROUND);
        assert_eq!(closed.get_pixel(12, 11)[0], FOREGROUND);
        assert_eq!(count_foreground(&closed), 14 * 14);
    }

    #[test]
    fn border_regions_are_not_eroded_from_outside() {
        // A band flush against the top edge keeps its border row.
        let mut mask = GrayImage::new(20, 20);
        draw_filled_rect(&mut mask, 5, 0, 10, 6, FOREGROUND);

        let eroded = erode(&mask, 3, 1);
        assert_eq!(eroded.get_pixel(10, 0)[0], FOREGROUND);
        assert_eq!(eroded.get_pixel(10, 5)[0], 0, "interior edge still shrinks");
    }
}
