//! Error handling for voxdiff.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod run_error;
pub mod ssd_error;
pub mod volume_error;

pub use config_error::ConfigError;
pub use error_code::VoxdiffErrorCode;
pub use run_error::RunError;
pub use ssd_error::SsdError;
pub use volume_error::VolumeError;
