//! Configuration system for voxdiff.
//! TOML-based, 4-layer resolution: CLI > env > config file > defaults.

pub mod engine_config;
pub mod source_config;
pub mod voxdiff_config;

pub use engine_config::EngineConfig;
pub use source_config::SourceConfig;
pub use voxdiff_config::{CliOverrides, VoxdiffConfig};
