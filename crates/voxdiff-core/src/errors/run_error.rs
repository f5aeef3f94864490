//! Run errors: everything that can abort a scoring run.

use super::error_code::VoxdiffErrorCode;
use super::{ConfigError, SsdError, VolumeError};

/// Errors that can occur during a run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Volume error: {0}")]
    Volume(#[from] VolumeError),

    #[error("SSD error: {0}")]
    Ssd(#[from] SsdError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VoxdiffErrorCode for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Volume(e) => e.error_code(),
            Self::Ssd(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
