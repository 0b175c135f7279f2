//! Stage sequencing: channel → denoise → threshold → morphology → labeling
//! → (nuclei) watershed → relationship join.
//!
//! Every intermediate artifact is an always-populated field of its stage's
//! return struct; there are no conditional recomputation paths. Stages are
//! pure functions of their inputs, so a failed analysis is never retried.

use image::{GrayImage, RgbImage};
use log::{debug, info};

use crate::analyzer::AnalysisResult;
use crate::channel::extract_channel;
use crate::config::{AnalyzeConfig, MyotubeConfig, NucleiConfig};
use crate::denoise::gaussian_smooth;
use crate::distance::{normalized_distance_transform, DistanceMap};
use crate::error::{ensure_same_dimensions, AnalyzeError};
use crate::labeling::{
    apply_area_filter, label_components, regions_from_label_map, LabelMap, Region,
};
use crate::morphology::{close, dilate, erode, open};
use crate::relate::classify_nuclei;
use crate::threshold::{adaptive_mean_threshold, binarize, otsu_threshold};
use crate::watershed::{find_markers, label_markers, watershed};

/// Output of the myotube segmentation path.
#[derive(Debug, Clone)]
pub struct MyotubeSegmentation {
    /// Post-filter binary mask.
    pub mask: GrayImage,
    /// Labels of the post-filter mask.
    pub labels: LabelMap,
    /// Post-filter regions.
    pub regions: Vec<Region>,
    /// Number of surviving myotube regions.
    pub count: usize,
    /// Total myotube pixel area after filtering.
    pub total_area: usize,
    /// Myotube area as a percentage of the image area.
    pub area_percentage: f64,
}

/// Output of the nuclei segmentation path.
#[derive(Debug, Clone)]
pub struct NucleiSegmentation {
    /// Cleaned binary mask (post erode/dilate).
    pub mask: GrayImage,
    /// Normalized distance transform used for watershed seeding.
    pub distance: DistanceMap,
    /// Watershed label map; one label per split nucleus.
    pub labels: LabelMap,
    /// Number of detected nuclei (number of watershed markers).
    pub count: usize,
}

/// Segment elongated myotube structures from their intensity channel.
pub fn segment_myotubes(channel: &GrayImage, config: &MyotubeConfig) -> MyotubeSegmentation {
    let smoothed = gaussian_smooth(channel);
    let binary = adaptive_mean_threshold(&smoothed, config.block_size, config.offset);
    let opened = open(&binary, config.open_kernel, config.open_iterations);
    let closed = close(&opened, config.close_kernel, config.close_iterations);

    let (_, raw_regions) = label_components(&closed);
    let filtered = apply_area_filter(closed.dimensions(), &raw_regions, config.min_area);
    let (labels, regions) = label_components(&filtered);
    debug!(
        "myotube labeling: {} raw regions, {} survive the {}-px area filter",
        raw_regions.len(),
        regions.len(),
        config.min_area
    );

    let count = regions.len();
    let total_area: usize = regions.iter().map(|r| r.area).sum();
    let (width, height) = channel.dimensions();
    let image_area = width as usize * height as usize;
    let area_percentage = if image_area > 0 {
        total_area as f64 / image_area as f64 * 100.0
    } else {
        0.0
    };

    MyotubeSegmentation {
        mask: filtered,
        labels,
        regions,
        count,
        total_area,
        area_percentage,
    }
}

/// Segment nuclei from their intensity channel, splitting touching nuclei
/// with a distance-transform watershed.
pub fn segment_nuclei(
    channel: &GrayImage,
    config: &NucleiConfig,
) -> Result<NucleiSegmentation, AnalyzeError> {
    let smoothed = gaussian_smooth(channel);
    let threshold = otsu_threshold(&smoothed);
    debug!("otsu threshold value: {}", threshold);
    let binary = binarize(&smoothed, threshold);

    let eroded = erode(&binary, config.erode_kernel, config.erode_iterations);
    let mask = dilate(&eroded, config.dilate_kernel, config.dilate_iterations);

    let distance = normalized_distance_transform(&mask);
    let markers = find_markers(&distance, &mask, config.min_peak_distance);
    debug!("found {} watershed markers", markers.len());

    let marker_map = label_markers(&markers, mask.dimensions());
    let labels = watershed(&distance, &marker_map, &mask)?;

    Ok(NucleiSegmentation {
        mask,
        distance,
        labels,
        count: markers.len(),
    })
}

/// Run the full analysis on a decoded 3-channel image.
pub fn run(image: &RgbImage, config: &AnalyzeConfig) -> Result<AnalysisResult, AnalyzeError> {
    let myotube_channel = extract_channel(image, config.channels.myotube)?;
    let nuclei_channel = extract_channel(image, config.channels.nuclei)?;

    let myotubes = segment_myotubes(&myotube_channel, &config.myotube);
    let nuclei = segment_nuclei(&nuclei_channel, &config.nuclei)?;
    ensure_same_dimensions(myotubes.mask.dimensions(), nuclei.labels.dimensions())?;

    let nuclei_regions = regions_from_label_map(&nuclei.labels);
    let relationship = classify_nuclei(&nuclei_regions, &myotubes.mask);

    let nuclei_count = relationship.centroids.len();
    info!(
        "analysis: {} myotubes ({:.2}% area), {} nuclei, {:.2}% within myotubes",
        myotubes.count,
        myotubes.area_percentage,
        nuclei_count,
        relationship.percentage_within_myotubes
    );

    Ok(AnalysisResult {
        myotube_count: myotubes.count,
        total_myotube_area: myotubes.total_area,
        myotube_area_percentage: myotubes.area_percentage,
        nuclei_count,
        nuclei_within_myotubes: relationship.nuclei_within_myotubes,
        nuclei_outside_myotubes: relationship.nuclei_outside_myotubes,
        percentage_within_myotubes: relationship.percentage_within_myotubes,
        myotube_mask: myotubes.mask,
        myotube_labels: myotubes.labels,
        nuclei_labels: nuclei.labels,
        nuclei_centroids: relationship.centroids,
        nuclei_in_myotube: relationship.in_myotube,
        image_size: [image.width(), image.height()],
    })
}
