//! Volume model - the immutable 4D (x, y, z, t) voxel array the engine reads.

mod any;
mod types;

pub use any::AnyVolume;
pub use types::{ByteOrder, DataType, OffsetSource, Volume, VolumeMetadata, VolumeShape, Voxel};
