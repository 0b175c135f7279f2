//! Distance-transform watershed: marker extraction and priority flooding.
//!
//! Touching nuclei merge into one thresholded blob; flooding the negated
//! distance map from its interior maxima splits the blob where the basins
//! meet. Every step is deterministic: ties between equal-valued maxima go to
//! the earlier raster index, and ties in the flood queue go to the earlier
//! insertion.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use image::{GrayImage, Luma};

use crate::distance::DistanceMap;
use crate::error::{ensure_same_dimensions, AnalyzeError};
use crate::labeling::{LabelMap, NEIGHBORS_8};

/// Find local maxima of the distance map restricted to foreground pixels.
///
/// A pixel is a marker when no pixel in the surrounding Chebyshev window of
/// radius `min_distance` has a larger value, nor an equal value at a smaller
/// raster index. Returns (x, y) positions in raster order.
pub fn find_markers(
    dist: &DistanceMap,
    mask: &GrayImage,
    min_distance: u32,
) -> Vec<(u32, u32)> {
    let (width, height) = dist.dimensions();
    let radius = min_distance as i64;
    let mut markers = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y)[0] == 0 {
                continue;
            }
            let value = dist.get_pixel(x, y)[0];
            if value <= 0.0 {
                continue;
            }
            let index = y as u64 * width as u64 + x as u64;

            let mut is_max = true;
            'window: for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let neighbor = dist.get_pixel(nx as u32, ny as u32)[0];
                    let neighbor_index = ny as u64 * width as u64 + nx as u64;
                    if neighbor > value || (neighbor == value && neighbor_index < index) {
                        is_max = false;
                        break 'window;
                    }
                }
            }
            if is_max {
                markers.push((x, y));
            }
        }
    }
    markers
}

/// Label marker positions 1..=N in the order given.
pub fn label_markers(markers: &[(u32, u32)], dimensions: (u32, u32)) -> LabelMap {
    let mut map = LabelMap::new(dimensions.0, dimensions.1);
    for (i, &(x, y)) in markers.iter().enumerate() {
        map.put_pixel(x, y, Luma([i as u32 + 1]));
    }
    map
}

/// Queue entry ordered so the pixel with the highest distance (and, among
/// equals, the earliest insertion) pops first.
struct FloodItem {
    neg_dist: f32,
    seq: u64,
    x: u32,
    y: u32,
}

impl PartialEq for FloodItem {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for FloodItem {}

impl PartialOrd for FloodItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloodItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys so the smallest
        // negated distance (deepest basin point) wins.
        other
            .neg_dist
            .total_cmp(&self.neg_dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Flood the negated distance map outward from the markers, constrained to
/// the foreground mask.
///
/// Each connected blob of the mask is partitioned among the markers it
/// contains; blobs holding no marker stay background. With no markers at
/// all this is a no-op producing an all-zero label map.
pub fn watershed(
    dist: &DistanceMap,
    markers: &LabelMap,
    mask: &GrayImage,
) -> Result<LabelMap, AnalyzeError> {
    ensure_same_dimensions(mask.dimensions(), dist.dimensions())?;
    ensure_same_dimensions(mask.dimensions(), markers.dimensions())?;
    let (width, height) = mask.dimensions();

    let mut labels = markers.clone();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    for (x, y, pixel) in markers.enumerate_pixels() {
        if pixel[0] != 0 {
            heap.push(FloodItem {
                neg_dist: -dist.get_pixel(x, y)[0],
                seq,
                x,
                y,
            });
            seq += 1;
        }
    }

    while let Some(item) = heap.pop() {
        let label = labels.get_pixel(item.x, item.y)[0];
        for (dy, dx) in NEIGHBORS_8 {
            let nx = item.x as i64 + dx;
            let ny = item.y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if mask.get_pixel(nx, ny)[0] > 0 && labels.get_pixel(nx, ny)[0] == 0 {
                labels.put_pixel(nx, ny, Luma([label]));
                heap.push(FloodItem {
                    neg_dist: -dist.get_pixel(nx, ny)[0],
                    seq,
                    x: nx,
                    y: ny,
                });
                seq += 1;
            }
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::normalized_distance_transform;
    use crate::test_utils::draw_disc;
    use crate::FOREGROUND;

    #[test]
    fn single_disc_yields_one_marker_and_one_basin() {
        let mut mask = GrayImage::new(40, 40);
        draw_disc(&mut mask, 20, 20, 9.0, FOREGROUND);

        let dist = normalized_distance_transform(&mask);
        let markers = find_markers(&dist, &mask, 7);
        assert_eq!(markers.len(), 1);

        let marker_map = label_markers(&markers, mask.dimensions());
        let labels = watershed(&dist, &marker_map, &mask).unwrap();

        for (x, y, pixel) in labels.enumerate_pixels() {
            if mask.get_pixel(x, y)[0] > 0 {
                assert_eq!(pixel[0], 1, "every mask pixel joins the single basin");
            } else {
                assert_eq!(pixel[0], 0);
            }
        }
    }

    #[test]
    fn touching_discs_split_into_two_basins() {
        let mut mask = GrayImage::new(60, 40);
        draw_disc(&mut mask, 21, 20, 10.0, FOREGROUND);
        draw_disc(&mut mask, 39, 20, 10.0, FOREGROUND);

        let dist = normalized_distance_transform(&mask);
        let markers = find_markers(&dist, &mask, 7);
        assert_eq!(markers.len(), 2, "one marker per disc center");

        let marker_map = label_markers(&markers, mask.dimensions());
        let labels = watershed(&dist, &marker_map, &mask).unwrap();

        let max_label = labels.pixels().map(|p| p[0]).max().unwrap();
        assert_eq!(max_label, 2);
        assert_ne!(
            labels.get_pixel(21, 20)[0],
            labels.get_pixel(39, 20)[0],
            "disc centers belong to different basins"
        );
    }

    #[test]
    fn watershed_is_deterministic() {
        let mut mask = GrayImage::new(60, 40);
        draw_disc(&mut mask, 21, 20, 10.0, FOREGROUND);
        draw_disc(&mut mask, 39, 20, 10.0, FOREGROUND);

        let dist = normalized_distance_transform(&mask);
        let markers = find_markers(&dist, &mask, 7);
        let marker_map = label_markers(&markers, mask.dimensions());

        let first = watershed(&dist, &marker_map, &mask).unwrap();
        let second = watershed(&dist, &marker_map, &mask).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn empty_mask_produces_no_markers_and_a_zero_map() {
        let mask = GrayImage::new(20, 20);
        let dist = normalized_distance_transform(&mask);
        let markers = find_markers(&dist, &mask, 7);
        assert!(markers.is_empty());

        let marker_map = label_markers(&markers, mask.dimensions());
        let labels = watershed(&dist, &marker_map, &mask).unwrap();
        assert!(labels.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn mismatched_mask_dimensions_are_a_defect() {
        let mask = GrayImage::new(20, 20);
        let dist = DistanceMap::new(20, 19);
        let markers = LabelMap::new(20, 20);
        let err = watershed(&dist, &markers, &mask).unwrap_err();
        assert!(matches!(err, AnalyzeError::ShapeMismatch { .. }));
    }
}
