//! Seams between the engine and its collaborators.

pub mod volume_source;

pub use volume_source::{LoadedVolume, VolumeSource};
