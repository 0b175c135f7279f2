//! Error taxonomy for the analysis pipeline.
//!
//! A degenerate segmentation (empty foreground) is deliberately *not* an
//! error: downstream counts are zero and every ratio denominator is guarded,
//! so the pipeline reports zeros instead of failing.

/// Errors that abort a single image analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Input image is zero-sized or lacks a required channel.
    InvalidImage(String),
    /// Two companion grids disagree on dimensions. This is an internal
    /// invariant violation, not a user-facing condition.
    ShapeMismatch {
        expected: [u32; 2],
        got: [u32; 2],
    },
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidImage(msg) => write!(f, "invalid image: {}", msg),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected[0], expected[1], got[0], got[1]
            ),
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// Check that a companion grid matches the dimensions of its reference grid.
pub(crate) fn ensure_same_dimensions(
    expected: (u32, u32),
    got: (u32, u32),
) -> Result<(), AnalyzeError> {
    if expected == got {
        Ok(())
    } else {
        Err(AnalyzeError::ShapeMismatch {
            expected: [expected.0, expected.1],
            got: [got.0, got.1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_reports_both_dimension_pairs() {
        let err = ensure_same_dimensions((64, 48), (64, 47)).unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::ShapeMismatch {
                expected: [64, 48],
                got: [64, 47],
            }
        );
        assert_eq!(err.to_string(), "shape mismatch: expected 64x48, got 64x47");
    }

    #[test]
    fn matching_dimensions_pass() {
        assert!(ensure_same_dimensions((10, 20), (10, 20)).is_ok());
    }
}
