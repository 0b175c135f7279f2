//! Per-stage analysis configuration.
//!
//! All tunables that the stages previously shared implicitly live here as an
//! explicit structure threaded through the pipeline call, so concurrent
//! per-image analyses with different settings never interfere.

use serde::{Deserialize, Serialize};

/// Channel indices carrying each signal. Fixed by acquisition convention,
/// never inferred from image content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelAssignment {
    /// Channel holding the myotube stain (red by convention).
    pub myotube: usize,
    /// Channel holding the nuclei stain (blue by convention).
    pub nuclei: usize,
}

impl Default for ChannelAssignment {
    fn default() -> Self {
        Self {
            myotube: 0,
            nuclei: 2,
        }
    }
}

/// Myotube-path tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MyotubeConfig {
    /// Side length of the square neighborhood for adaptive thresholding.
    /// Must be odd.
    pub block_size: u32,
    /// Constant subtracted from the local mean; a pixel is foreground when
    /// it exceeds `local_mean - offset`.
    pub offset: i16,
    /// Kernel side for the speckle-removing opening.
    pub open_kernel: u32,
    /// Opening iterations (erosions then dilations).
    pub open_iterations: u32,
    /// Kernel side for the gap-bridging closing.
    pub close_kernel: u32,
    /// Closing iterations (dilations then erosions).
    pub close_iterations: u32,
    /// Regions below this pixel area are discarded as residual noise.
    pub min_area: usize,
}

impl Default for MyotubeConfig {
    fn default() -> Self {
        Self {
            block_size: 21,
            offset: -5,
            open_kernel: 3,
            open_iterations: 1,
            close_kernel: 5,
            close_iterations: 2,
            min_area: 100,
        }
    }
}

/// Nuclei-path tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NucleiConfig {
    /// Kernel side for the touching-nuclei-separating erosion.
    pub erode_kernel: u32,
    /// Erosion iterations.
    pub erode_iterations: u32,
    /// Kernel side for the size-restoring dilation.
    pub dilate_kernel: u32,
    /// Dilation iterations.
    pub dilate_iterations: u32,
    /// Minimum Chebyshev separation (pixels) between watershed markers.
    pub min_peak_distance: u32,
}

impl Default for NucleiConfig {
    fn default() -> Self {
        Self {
            erode_kernel: 3,
            erode_iterations: 1,
            dilate_kernel: 3,
            dilate_iterations: 1,
            min_peak_distance: 7,
        }
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Signal-to-channel assignment.
    pub channels: ChannelAssignment,
    /// Myotube segmentation controls.
    pub myotube: MyotubeConfig,
    /// Nuclei segmentation controls.
    pub nuclei: NucleiConfig,
}
