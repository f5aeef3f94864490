//! voxdiff-core: frame-to-reference dissimilarity for 4D imaging volumes
//!
//! This crate provides:
//! - Volume: immutable (x, y, z, t) voxel arrays over `ndarray`
//! - NIfTI: single-file NIfTI-1 decoding with validated data offsets
//! - SSD: sum of squared differences of every frame against frame 0
//! - Config: TOML + environment + CLI layered settings
//! - Pipeline: load, score, and time a run end to end

pub mod config;
pub mod errors;
pub mod nifti;
pub mod pipeline;
pub mod ssd;
pub mod timing;
pub mod traits;
pub mod volume;

// Re-exports for convenience
pub use config::{CliOverrides, VoxdiffConfig};
pub use errors::{ConfigError, RunError, SsdError, VolumeError, VoxdiffErrorCode};
pub use nifti::{NiftiSource, OffsetPolicy};
pub use pipeline::{run, run_with, ScoreReport};
pub use ssd::{
    extract_frame, nested_ssd, pairwise_ssd, score_any, ScoreEngine, ScoreListBuilder,
    ScoreSequence, Strategy,
};
pub use timing::{time_repeated, TimingStats};
pub use traits::{LoadedVolume, VolumeSource};
pub use volume::{AnyVolume, DataType, Volume, VolumeMetadata, VolumeShape, Voxel};
