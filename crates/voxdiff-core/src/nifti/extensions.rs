//! NIfTI-1 header extensions.
//!
//! Byte 348 is the first of four "extender" bytes; when it is non-zero a
//! chain of `(esize: i32, ecode: i32, payload)` records follows from byte 352.
//! Some writers leave `vox_offset` at 0 even with extensions present, so the
//! end of this chain is an independent witness for where voxel data begins.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use tracing::debug;

use super::header::{HEADER_SIZE, MIN_DATA_OFFSET};
use crate::volume::ByteOrder;

/// Result of walking the extension chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionChain {
    /// `ecode` of every well-formed record, in file order.
    pub codes: Vec<i32>,
    /// Offset one past each well-formed record, parallel to `codes`.
    pub ends: Vec<u64>,
    /// Offset one past the last well-formed record (352 when empty).
    pub end: u64,
}

impl ExtensionChain {
    pub fn count(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Bytes occupied by the records themselves.
    pub fn bytes(&self) -> u64 {
        self.end - MIN_DATA_OFFSET
    }

    /// Whether some non-empty prefix of the chain ends exactly at `offset`.
    pub fn has_boundary(&self, offset: u64) -> bool {
        self.ends.contains(&offset)
    }

    /// The records that end at or before `offset`. Anything past the voxel
    /// data start was voxel bytes that happened to parse as a record.
    pub fn truncated_at(&self, offset: u64) -> ExtensionChain {
        let keep = self.ends.iter().take_while(|&&end| end <= offset).count();
        ExtensionChain {
            codes: self.codes[..keep].to_vec(),
            ends: self.ends[..keep].to_vec(),
            end: self.ends[..keep].last().copied().unwrap_or(MIN_DATA_OFFSET),
        }
    }
}

/// Walk extension records, stopping at the first malformed record or at
/// `limit`, the latest offset at which voxel data could still start.
pub fn walk_extensions(bytes: &[u8], byte_order: ByteOrder, limit: u64) -> ExtensionChain {
    match byte_order {
        ByteOrder::Little => walk::<LittleEndian>(bytes, limit),
        ByteOrder::Big => walk::<BigEndian>(bytes, limit),
    }
}

fn walk<E: Endian>(bytes: &[u8], limit: u64) -> ExtensionChain {
    let mut chain = ExtensionChain {
        codes: Vec::new(),
        ends: Vec::new(),
        end: MIN_DATA_OFFSET,
    };

    let has_extensions = bytes.get(HEADER_SIZE).is_some_and(|&flag| flag != 0);
    if !has_extensions {
        return chain;
    }

    let limit = limit.min(bytes.len() as u64);
    let mut pos = MIN_DATA_OFFSET;
    while pos + 8 <= limit {
        let at = pos as usize;
        let esize = E::read_i32(&bytes[at..at + 4]);
        let ecode = E::read_i32(&bytes[at + 4..at + 8]);
        if esize < 16 || esize % 16 != 0 {
            debug!(pos, esize, "malformed extension record, stopping");
            break;
        }
        let next = pos + esize as u64;
        if next > limit {
            debug!(pos, esize, limit, "extension record overruns voxel data, stopping");
            break;
        }
        debug!(pos, esize, ecode, "extension record");
        chain.codes.push(ecode);
        chain.ends.push(next);
        pos = next;
    }
    chain.end = pos;
    chain
}
