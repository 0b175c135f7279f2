//! Nucleus-in-myotube spatial join.
//!
//! Residency is decided by the mask value at the nucleus centroid pixel, not
//! by full-extent overlap. This is a deliberate, cheap approximation that
//! assumes nuclei are small relative to myotube width; whether partial
//! overlap should count as "within" is an unresolved product decision kept
//! as-is.

use image::GrayImage;

use crate::labeling::Region;

/// Aggregated nucleus/myotube relationship metrics.
#[derive(Debug, Clone, Default)]
pub struct RelationshipMetrics {
    /// Nuclei whose centroid pixel lies inside the myotube mask.
    pub nuclei_within_myotubes: usize,
    /// Nuclei whose centroid pixel lies outside the mask (or outside the
    /// image bounds).
    pub nuclei_outside_myotubes: usize,
    /// `within / (within + outside) * 100`, or 0.0 with no nuclei.
    pub percentage_within_myotubes: f64,
    /// Nucleus centroids as (row, col), in label order.
    pub centroids: Vec<(f64, f64)>,
    /// Per-nucleus residency flags, parallel to `centroids`.
    pub in_myotube: Vec<bool>,
}

/// Classify each nucleus region against the post-filter myotube mask.
///
/// The centroid is truncated to integer pixel coordinates; a centroid whose
/// truncated position falls outside the mask bounds counts as outside rather
/// than raising an error.
pub fn classify_nuclei(nuclei: &[Region], myotube_mask: &GrayImage) -> RelationshipMetrics {
    let (width, height) = myotube_mask.dimensions();
    let mut metrics = RelationshipMetrics::default();

    for region in nuclei {
        let (row, col) = region.centroid;
        metrics.centroids.push((row, col));

        let row_px = row as i64;
        let col_px = col as i64;
        let inside = row_px >= 0
            && col_px >= 0
            && row_px < height as i64
            && col_px < width as i64
            && myotube_mask.get_pixel(col_px as u32, row_px as u32)[0] > 0;

        if inside {
            metrics.nuclei_within_myotubes += 1;
        } else {
            metrics.nuclei_outside_myotubes += 1;
        }
        metrics.in_myotube.push(inside);
    }

    let total = metrics.nuclei_within_myotubes + metrics.nuclei_outside_myotubes;
    if total > 0 {
        metrics.percentage_within_myotubes =
            metrics.nuclei_within_myotubes as f64 / total as f64 * 100.0;
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::draw_filled_rect;
    use crate::FOREGROUND;

    fn nucleus_at(label: u32, row: f64, col: f64) -> Region {
        Region {
            label,
            area: 1,
            centroid: (row, col),
            coords: vec![],
        }
    }

    #[test]
    fn one_inside_one_outside_is_fifty_percent() {
        let mut mask = GrayImage::new(50, 50);
        draw_filled_rect(&mut mask, 10, 10, 20, 20, FOREGROUND);

        let nuclei = vec![nucleus_at(1, 15.0, 15.0), nucleus_at(2, 40.0, 40.0)];
        let metrics = classify_nuclei(&nuclei, &mask);

        assert_eq!(metrics.nuclei_within_myotubes, 1);
        assert_eq!(metrics.nuclei_outside_myotubes, 1);
        assert_eq!(metrics.percentage_within_myotubes, 50.0);
        assert_eq!(metrics.in_myotube, vec![true, false]);
        assert_eq!(metrics.centroids.len(), 2);
    }

    #[test]
    fn no_nuclei_gives_exact_zero_percentage() {
        let mask = GrayImage::new(10, 10);
        let metrics = classify_nuclei(&[], &mask);
        assert_eq!(metrics.nuclei_within_myotubes, 0);
        assert_eq!(metrics.nuclei_outside_myotubes, 0);
        assert_eq!(metrics.percentage_within_myotubes, 0.0);
    }

    #[test]
    fn out_of_bounds_centroid_counts_as_outside() {
        let mask = GrayImage::from_pixel(10, 10, image::Luma([FOREGROUND]));
        let nuclei = vec![nucleus_at(1, 12.5, 3.0)];
        let metrics = classify_nuclei(&nuclei, &mask);
        assert_eq!(metrics.nuclei_outside_myotubes, 1);
        assert_eq!(metrics.in_myotube, vec![false]);
    }

    #[test]
    fn centroid_is_truncated_not_rounded() {
        // Mask foreground only at column 15; a centroid of 15.9 truncates to
        // 15 and lands inside.
        let mut mask = GrayImage::new(20, 20);
        draw_filled_rect(&mut mask, 15, 0, 1, 20, FOREGROUND);
        let metrics = classify_nuclei(&[nucleus_at(1, 5.0, 15.9)], &mask);
        assert_eq!(metrics.nuclei_within_myotubes, 1);
    }
}
