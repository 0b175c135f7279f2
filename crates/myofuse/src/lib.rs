//! myofuse — myotube/nuclei segmentation and fusion-index analysis for
//! two-channel fluorescence microscopy images.
//!
//! The pipeline stages are:
//!
//! 1. **Channel** – fixed-convention channel extraction (0 = myotube signal,
//!    2 = nuclei signal).
//! 2. **Denoise** – 5×5 Gaussian-weighted smoothing.
//! 3. **Threshold** – adaptive local-mean thresholding for elongated,
//!    unevenly lit myotubes; global Otsu thresholding for nuclei.
//! 4. **Morphology** – opening/closing (myotubes) and erode/dilate (nuclei)
//!    cleanup with fixed square kernels.
//! 5. **Labeling** – 8-connected component labeling, region metrics, and
//!    minimum-area filtering.
//! 6. **Watershed** – distance-transform marker extraction and
//!    priority-flood splitting of touching nuclei.
//! 7. **Relate** – nucleus-centroid-in-myotube-mask join producing the
//!    fusion-index proxy (percentage of nuclei inside myotubes).
//!
//! # Public API
//! [`Analyzer`] and [`AnalyzeConfig`] are the primary entry points;
//! [`AnalysisResult`] is the single output consumed by reporting and
//! visualization collaborators. The per-stage modules are public so callers
//! can run the myotube or nuclei path in isolation.
//!
//! Image decoding, report writing, and CLI concerns live outside this crate:
//! the core never touches a filesystem path.

pub mod analyzer;
pub mod channel;
pub mod config;
pub mod denoise;
pub mod distance;
pub mod error;
pub mod labeling;
pub mod morphology;
pub mod pipeline;
pub mod relate;
pub mod threshold;
pub mod watershed;

#[cfg(test)]
pub(crate) mod test_utils;

pub use analyzer::{AnalysisResult, AnalysisSummary, Analyzer};
pub use config::{AnalyzeConfig, ChannelAssignment, MyotubeConfig, NucleiConfig};
pub use error::AnalyzeError;
pub use labeling::{LabelMap, Region};
pub use pipeline::{MyotubeSegmentation, NucleiSegmentation};

/// Intensity value marking foreground pixels in binary masks.
pub const FOREGROUND: u8 = 255;
