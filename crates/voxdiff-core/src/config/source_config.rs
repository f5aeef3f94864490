//! Volume source configuration.

use serde::{Deserialize, Serialize};

use crate::nifti::OffsetPolicy;

/// Configuration for decoding input volumes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Voxel data offset policy. Default: validated.
    pub offset_policy: Option<OffsetPolicy>,
}

impl SourceConfig {
    /// Returns the effective offset policy, defaulting to validated.
    pub fn effective_offset_policy(&self) -> OffsetPolicy {
        self.offset_policy.unwrap_or_default()
    }
}
