//! SSD engine errors.

use super::error_code::{self, VoxdiffErrorCode};

/// Errors that can occur while extracting frames or computing scores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SsdError {
    #[error("Volume has {frames} time point(s); at least 2 are required")]
    TooFewFrames { frames: usize },

    #[error("Frame length mismatch: {left} vs {right} voxels")]
    LengthMismatch { left: usize, right: usize },

    #[error("Time index {index} out of range for {frames} frame(s)")]
    IndexOutOfRange { index: usize, frames: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl SsdError {
    /// True for the shape family: too few frames or mismatched frame lengths.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::TooFewFrames { .. } | Self::LengthMismatch { .. })
    }
}

impl VoxdiffErrorCode for SsdError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TooFewFrames { .. } | Self::LengthMismatch { .. } => error_code::SHAPE_ERROR,
            Self::IndexOutOfRange { .. } => error_code::INDEX_OUT_OF_RANGE,
            Self::ThreadPool(_) => error_code::THREAD_POOL_ERROR,
        }
    }
}
