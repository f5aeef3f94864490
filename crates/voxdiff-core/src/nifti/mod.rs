//! NIfTI-1 single-file source.
//!
//! Decodes `.nii` files into [`AnyVolume`](crate::volume::AnyVolume):
//! - header parsing with byte-order detection via `byteorder`
//! - extension chain walking, since `vox_offset` is not always trustworthy
//! - data offset resolution cross-checked against the file size
//! - memory-mapped voxel decoding via `memmap2`

mod extensions;
mod header;
mod offset;
mod source;

pub use extensions::{walk_extensions, ExtensionChain};
pub use header::{NiftiHeader, HEADER_SIZE, MIN_DATA_OFFSET};
pub use offset::{resolve_data_offset, OffsetPolicy, ResolvedOffset};
pub use source::{decode_bytes, NiftiSource};
