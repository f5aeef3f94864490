//! VolumeSource trait - "decode path into (shape, dtype, voxel buffer)".
//!
//! The engine never parses files itself. `NiftiSource` is the shipped
//! implementation; tests plug in synthetic in-memory sources.

use std::path::Path;

use crate::errors::VolumeError;
use crate::volume::{AnyVolume, VolumeMetadata};

/// A decoded volume plus what the source learned while decoding it.
#[derive(Debug, Clone)]
pub struct LoadedVolume {
    pub volume: AnyVolume,
    pub metadata: VolumeMetadata,
}

/// Anything that can turn a path into a 4D volume.
pub trait VolumeSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Load the volume at `path`.
    fn load(&self, path: &Path) -> Result<LoadedVolume, VolumeError>;
}
