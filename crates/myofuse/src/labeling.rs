//! Connected-component labeling, region metrics, and area filtering.
//!
//! Labeling is 8-connected throughout the crate (component labeling, marker
//! labeling, watershed flood), so both segmentation paths count regions
//! under the same convention. Labels form a dense range 1..=N assigned in
//! raster order of each component's first-encountered pixel; 0 is background.

use image::{GrayImage, ImageBuffer, Luma};

use crate::FOREGROUND;

/// Integer label grid: 0 = background, 1..=N = distinct components.
pub type LabelMap = ImageBuffer<Luma<u32>, Vec<u32>>;

/// 8-neighborhood offsets as (dy, dx).
pub(crate) const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Metrics of one labeled component, derived on demand from a label map.
#[derive(Debug, Clone)]
pub struct Region {
    /// Component label (> 0).
    pub label: u32,
    /// Pixel count.
    pub area: usize,
    /// Mean pixel position as (row, col).
    pub centroid: (f64, f64),
    /// Member pixels as (row, col).
    pub coords: Vec<(u32, u32)>,
}

/// Label each maximal 8-connected foreground set with a unique positive
/// integer and return the label map plus per-label region metrics.
pub fn label_components(mask: &GrayImage) -> (LabelMap, Vec<Region>) {
    let (width, height) = mask.dimensions();
    let mut map = LabelMap::new(width, height);
    let mut regions = Vec::new();
    let mut next_label = 0u32;
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y)[0] == 0 || map.get_pixel(x, y)[0] != 0 {
                continue;
            }
            next_label += 1;
            map.put_pixel(x, y, Luma([next_label]));
            stack.push((x, y));

            let mut coords = Vec::new();
            let mut row_sum = 0.0f64;
            let mut col_sum = 0.0f64;
            while let Some((cx, cy)) = stack.pop() {
                coords.push((cy, cx));
                row_sum += cy as f64;
                col_sum += cx as f64;
                for (dy, dx) in NEIGHBORS_8 {
                    let nx = cx as i64 + dx;
                    let ny = cy as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if mask.get_pixel(nx, ny)[0] > 0 && map.get_pixel(nx, ny)[0] == 0 {
                        map.put_pixel(nx, ny, Luma([next_label]));
                        stack.push((nx, ny));
                    }
                }
            }

            let area = coords.len();
            regions.push(Region {
                label: next_label,
                area,
                centroid: (row_sum / area as f64, col_sum / area as f64),
                coords,
            });
        }
    }
    (map, regions)
}

/// Derive region metrics from an existing label map (e.g. a watershed
/// output, whose components were not produced by [`label_components`]).
pub fn regions_from_label_map(map: &LabelMap) -> Vec<Region> {
    let max_label = map.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    if max_label == 0 {
        return Vec::new();
    }

    struct Accum {
        area: usize,
        row_sum: f64,
        col_sum: f64,
        coords: Vec<(u32, u32)>,
    }
    let mut accums: Vec<Accum> = (0..max_label)
        .map(|_| Accum {
            area: 0,
            row_sum: 0.0,
            col_sum: 0.0,
            coords: Vec::new(),
        })
        .collect();

    for (x, y, pixel) in map.enumerate_pixels() {
        let label = pixel[0];
        if label == 0 {
            continue;
        }
        let accum = &mut accums[(label - 1) as usize];
        accum.area += 1;
        accum.row_sum += y as f64;
        accum.col_sum += x as f64;
        accum.coords.push((y, x));
    }

    accums
        .into_iter()
        .enumerate()
        .filter(|(_, a)| a.area > 0)
        .map(|(index, a)| Region {
            label: index as u32 + 1,
            area: a.area,
            centroid: (a.row_sum / a.area as f64, a.col_sum / a.area as f64),
            coords: a.coords,
        })
        .collect()
}

/// Rebuild a mask keeping only regions with `area >= min_area`. Pixels of
/// discarded regions are reset to background.
pub fn apply_area_filter(
    dimensions: (u32, u32),
    regions: &[Region],
    min_area: usize,
) -> GrayImage {
    let mut out = GrayImage::new(dimensions.0, dimensions.1);
    for region in regions {
        if region.area < min_area {
            continue;
        }
        for &(row, col) in &region.coords {
            out.put_pixel(col, row, Luma([FOREGROUND]));
        }
    }
    out
}
