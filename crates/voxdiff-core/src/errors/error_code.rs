//! Stable error codes surfaced to the command line.

/// Every subsystem error maps onto one of the codes below.
pub trait VoxdiffErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const VOLUME_NOT_FOUND: &str = "VOLUME_NOT_FOUND";
pub const VOLUME_READ_ERROR: &str = "VOLUME_READ_ERROR";
pub const INVALID_HEADER: &str = "INVALID_HEADER";
pub const UNSUPPORTED_FORMAT: &str = "UNSUPPORTED_FORMAT";
pub const INVALID_OFFSET: &str = "INVALID_OFFSET";
pub const SHAPE_ERROR: &str = "SHAPE_ERROR";
pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
