//! NiftiSource - memory-maps a `.nii` file and decodes it into a volume.

use std::fs::File;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use memmap2::Mmap;
use tracing::{debug, info, warn};

use super::extensions::walk_extensions;
use super::header::NiftiHeader;
use super::offset::{resolve_data_offset, OffsetPolicy};
use crate::errors::VolumeError;
use crate::traits::{LoadedVolume, VolumeSource};
use crate::volume::{AnyVolume, ByteOrder, DataType, Volume, VolumeMetadata};

/// File-backed [`VolumeSource`] for single-file NIfTI-1 images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NiftiSource {
    policy: OffsetPolicy,
}

impl NiftiSource {
    pub fn new(policy: OffsetPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OffsetPolicy {
        self.policy
    }
}

impl VolumeSource for NiftiSource {
    fn name(&self) -> &'static str {
        "nifti"
    }

    fn load(&self, path: &Path) -> Result<LoadedVolume, VolumeError> {
        let file = File::open(path).map_err(|e| VolumeError::read(path, e))?;
        let file_len = file.metadata().map_err(|e| VolumeError::read(path, e))?.len();
        if file_len == 0 {
            return Err(VolumeError::InvalidHeader(format!("{} is empty", path.display())));
        }

        // SAFETY: the map is read-only and dropped before this function
        // returns; decoded voxels are copied out of it.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| VolumeError::read(path, e))?;
        debug!(path = %path.display(), file_len, "mapped volume file");

        decode_bytes(&map, self.policy)
    }
}

/// Decode a complete `.nii` image held in memory.
pub fn decode_bytes(bytes: &[u8], policy: OffsetPolicy) -> Result<LoadedVolume, VolumeError> {
    let header = NiftiHeader::parse(bytes)?;
    let datatype = header.data_type()?;
    let shape = header.shape()?;
    let file_len = bytes.len() as u64;

    let expected = (shape.total_voxels() as u64)
        .checked_mul(datatype.bytes_per_voxel() as u64)
        .ok_or_else(|| VolumeError::InvalidDimensions {
            dims: header.dim.iter().map(|&d| i64::from(d)).collect(),
            message: "voxel count overflows".to_string(),
        })?;

    let extensions = walk_extensions(bytes, header.byte_order, file_len.saturating_sub(expected));
    let resolved =
        resolve_data_offset(header.vox_offset, &extensions, file_len, expected, policy)?;
    let extensions = extensions.truncated_at(resolved.offset);
    debug!(
        declared = header.vox_offset,
        resolved = resolved.offset,
        source = ?resolved.source,
        extensions = extensions.count(),
        "resolved voxel data offset"
    );

    let start = resolved.offset as usize;
    let raw = &bytes[start..start + expected as usize];
    let volume = match datatype {
        DataType::UInt8 => AnyVolume::from(Volume::from_fortran_vec(shape, raw.to_vec())?),
        DataType::Int8 => AnyVolume::from(Volume::from_fortran_vec(
            shape,
            raw.iter().map(|&b| b as i8).collect(),
        )?),
        DataType::Int16 => {
            let mut voxels = vec![0i16; raw.len() / 2];
            match header.byte_order {
                ByteOrder::Little => LittleEndian::read_i16_into(raw, &mut voxels),
                ByteOrder::Big => BigEndian::read_i16_into(raw, &mut voxels),
            }
            AnyVolume::from(Volume::from_fortran_vec(shape, voxels)?)
        }
        DataType::UInt16 => {
            let mut voxels = vec![0u16; raw.len() / 2];
            match header.byte_order {
                ByteOrder::Little => LittleEndian::read_u16_into(raw, &mut voxels),
                ByteOrder::Big => BigEndian::read_u16_into(raw, &mut voxels),
            }
            AnyVolume::from(Volume::from_fortran_vec(shape, voxels)?)
        }
    };

    let metadata = VolumeMetadata {
        datatype,
        byte_order: header.byte_order,
        declared_offset: header.vox_offset,
        data_offset: resolved.offset,
        offset_source: resolved.source,
        extension_count: extensions.count(),
        extension_bytes: extensions.bytes(),
        pixdim: [header.pixdim[1], header.pixdim[2], header.pixdim[3], header.pixdim[4]],
        scl_slope: header.scl_slope,
        scl_inter: header.scl_inter,
        description: header.descrip,
    };

    if metadata.has_scaling() {
        warn!(
            scl_slope = metadata.scl_slope,
            scl_inter = metadata.scl_inter,
            "header declares intensity scaling; scores use stored values"
        );
    }
    info!(%shape, %datatype, offset = resolved.offset, "decoded volume");

    Ok(LoadedVolume { volume, metadata })
}
