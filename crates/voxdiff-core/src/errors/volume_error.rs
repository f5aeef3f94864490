//! Volume source errors.

use super::error_code::{self, VoxdiffErrorCode};

/// Errors that can occur while locating or decoding a volume.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("Volume file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported datatype code {code} (bitpix {bitpix})")]
    UnsupportedDatatype { code: i16, bitpix: i16 },

    #[error("Invalid dimensions {dims:?}: {message}")]
    InvalidDimensions { dims: Vec<i64>, message: String },

    #[error("Truncated volume: need {expected} bytes of voxel data, file has {file_len} bytes")]
    Truncated { expected: u64, file_len: u64 },

    #[error("Cannot resolve voxel data offset (declared {declared}, file {file_len} bytes): {message}")]
    OffsetUnresolved {
        declared: f32,
        file_len: u64,
        message: String,
    },
}

impl VolumeError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Self::Read {
                path: path.display().to_string(),
                source,
            }
        }
    }
}

impl VoxdiffErrorCode for VolumeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::VOLUME_NOT_FOUND,
            Self::Read { .. } => error_code::VOLUME_READ_ERROR,
            Self::InvalidHeader(_) | Self::InvalidDimensions { .. } => {
                error_code::INVALID_HEADER
            }
            Self::UnsupportedFormat(_) | Self::UnsupportedDatatype { .. } => {
                error_code::UNSUPPORTED_FORMAT
            }
            Self::Truncated { .. } | Self::OffsetUnresolved { .. } => error_code::INVALID_OFFSET,
        }
    }
}
