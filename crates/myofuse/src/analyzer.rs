//! High-level analysis API.
//!
//! [`Analyzer`] is the primary entry point: it wraps an [`AnalyzeConfig`]
//! and turns a decoded 3-channel image into an [`AnalysisResult`]. Create
//! once, analyze many images; per-image calls share no mutable state, so
//! callers may run them concurrently.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::AnalyzeConfig;
use crate::error::AnalyzeError;
use crate::labeling::LabelMap;
use crate::pipeline;

/// Full analysis result for a single image.
///
/// Immutable after construction and owned by the caller; reporting and
/// visualization collaborators read it, never mutate it.
///
/// Invariants: `nuclei_within_myotubes + nuclei_outside_myotubes ==
/// nuclei_count`, and `nuclei_centroids` / `nuclei_in_myotube` are parallel
/// sequences of length `nuclei_count`.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Myotube regions surviving the minimum-area filter.
    pub myotube_count: usize,
    /// Total post-filter myotube pixel area.
    pub total_myotube_area: usize,
    /// Myotube area as a percentage of the image area.
    pub myotube_area_percentage: f64,
    /// Detected nuclei after watershed splitting.
    pub nuclei_count: usize,
    /// Nuclei whose centroid lies inside the myotube mask.
    pub nuclei_within_myotubes: usize,
    /// Nuclei whose centroid lies outside it.
    pub nuclei_outside_myotubes: usize,
    /// Fusion-index proxy: `within / nuclei_count * 100`, 0.0 with no nuclei.
    pub percentage_within_myotubes: f64,
    /// Post-filter myotube binary mask.
    pub myotube_mask: GrayImage,
    /// Labels of the post-filter myotube mask.
    pub myotube_labels: LabelMap,
    /// Watershed nuclei label map.
    pub nuclei_labels: LabelMap,
    /// Nucleus centroids as (row, col), in label order.
    pub nuclei_centroids: Vec<(f64, f64)>,
    /// Per-nucleus residency flags, parallel to `nuclei_centroids`.
    pub nuclei_in_myotube: Vec<bool>,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
}

impl AnalysisResult {
    /// Scalar/centroid view without the pixel buffers, for serialization by
    /// reporting collaborators.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_nuclei: self.nuclei_count,
            nuclei_within_myotubes: self.nuclei_within_myotubes,
            nuclei_outside_myotubes: self.nuclei_outside_myotubes,
            percentage_within_myotubes: self.percentage_within_myotubes,
            myotube_count: self.myotube_count,
            total_myotube_area: self.total_myotube_area,
            myotube_area_percentage: self.myotube_area_percentage,
            image_size: self.image_size,
            nuclei_centroids: self
                .nuclei_centroids
                .iter()
                .map(|&(row, col)| [row, col])
                .collect(),
            nuclei_in_myotube: self.nuclei_in_myotube.clone(),
        }
    }
}

/// Serializable analysis summary (everything but the pixel grids).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_nuclei: usize,
    pub nuclei_within_myotubes: usize,
    pub nuclei_outside_myotubes: usize,
    pub percentage_within_myotubes: f64,
    pub myotube_count: usize,
    pub total_myotube_area: usize,
    pub myotube_area_percentage: f64,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Nucleus centroids as [row, col].
    pub nuclei_centroids: Vec<[f64; 2]>,
    pub nuclei_in_myotube: Vec<bool>,
}

impl AnalysisSummary {
    /// Render as a JSON string for report writers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Primary analysis interface.
///
/// # Examples
///
/// ```
/// use myofuse::Analyzer;
/// use image::RgbImage;
///
/// let analyzer = Analyzer::new();
/// let image = RgbImage::new(640, 480);
/// let result = analyzer.analyze(&image).unwrap();
/// assert_eq!(result.nuclei_count, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzeConfig,
}

impl Analyzer {
    /// Create an analyzer with the default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AnalyzeConfig {
        &mut self.config
    }

    /// Analyze a decoded 3-channel image.
    pub fn analyze(&self, image: &RgbImage) -> Result<AnalysisResult, AnalyzeError> {
        pipeline::run(image, &self.config)
    }
}
