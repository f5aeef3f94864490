//! Voxel data offset resolution.
//!
//! `vox_offset` is a float in the header and is sometimes simply wrong (0 in
//! files that carry kilobytes of extensions). The validated policy only trusts
//! a candidate offset when the voxel block it implies fits in the file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::extensions::ExtensionChain;
use super::header::MIN_DATA_OFFSET;
use crate::errors::{ConfigError, VolumeError};
use crate::volume::OffsetSource;

/// How to decide where voxel data starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// Cross-check header, extensions, and file size.
    #[default]
    Validated,
    /// Trust `vox_offset` and nothing else.
    Header,
    /// Voxel data is the last `voxels * bytes_per_voxel` bytes of the file.
    Trailing,
}

impl OffsetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Header => "header",
            Self::Trailing => "trailing",
        }
    }
}

impl fmt::Display for OffsetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OffsetPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "validated" => Ok(Self::Validated),
            "header" => Ok(Self::Header),
            "trailing" => Ok(Self::Trailing),
            _ => Err(ConfigError::InvalidValue {
                field: "offset_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Where voxel data starts and which witness said so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOffset {
    pub offset: u64,
    pub source: OffsetSource,
}

/// Decide the voxel data offset for a file of `file_len` bytes holding
/// `expected` bytes of voxels.
pub fn resolve_data_offset(
    declared: f32,
    extensions: &ExtensionChain,
    file_len: u64,
    expected: u64,
    policy: OffsetPolicy,
) -> Result<ResolvedOffset, VolumeError> {
    if file_len < MIN_DATA_OFFSET.saturating_add(expected) {
        return Err(VolumeError::Truncated { expected, file_len });
    }

    let fits = |offset: u64| {
        offset >= MIN_DATA_OFFSET
            && offset.checked_add(expected).is_some_and(|end| end <= file_len)
    };
    let ends_file = |offset: u64| fits(offset) && offset + expected == file_len;
    let declared_offset = declared_as_offset(declared);
    let trailing = file_len - expected;

    match policy {
        OffsetPolicy::Header => match declared_offset {
            Some(offset) if fits(offset) => Ok(ResolvedOffset {
                offset,
                source: OffsetSource::Declared,
            }),
            _ => Err(VolumeError::OffsetUnresolved {
                declared,
                file_len,
                message: format!("declared offset cannot hold {} bytes of voxel data", expected),
            }),
        },
        OffsetPolicy::Trailing => Ok(ResolvedOffset {
            offset: trailing,
            source: OffsetSource::Trailing,
        }),
        OffsetPolicy::Validated => {
            if let Some(offset) = declared_offset.filter(|&o| ends_file(o)) {
                return Ok(ResolvedOffset {
                    offset,
                    source: OffsetSource::Declared,
                });
            }
            // A declared offset that fits and lands on an extension boundary
            // agrees with the chain; records walked past it are voxel bytes.
            if let Some(offset) =
                declared_offset.filter(|&o| fits(o) && extensions.has_boundary(o))
            {
                return Ok(ResolvedOffset {
                    offset,
                    source: OffsetSource::Declared,
                });
            }
            if !extensions.is_empty() && ends_file(extensions.end) {
                warn!(
                    declared,
                    resolved = extensions.end,
                    extensions = extensions.count(),
                    "vox_offset disagrees with header extensions, using end of extension chain"
                );
                return Ok(ResolvedOffset {
                    offset: extensions.end,
                    source: OffsetSource::Extensions,
                });
            }
            if let Some(offset) = declared_offset.filter(|&o| fits(o)) {
                warn!(
                    declared,
                    trailing_bytes = file_len - offset - expected,
                    "file continues past the declared voxel block"
                );
                return Ok(ResolvedOffset {
                    offset,
                    source: OffsetSource::Declared,
                });
            }
            warn!(
                declared,
                resolved = trailing,
                "vox_offset unusable, assuming voxel data ends the file"
            );
            Ok(ResolvedOffset {
                offset: trailing,
                source: OffsetSource::Trailing,
            })
        }
    }
}

/// `vox_offset` is stored as a float; only non-negative whole values count.
fn declared_as_offset(declared: f32) -> Option<u64> {
    (declared.is_finite() && declared >= 0.0 && declared.fract() == 0.0)
        .then(|| declared as u64)
}
