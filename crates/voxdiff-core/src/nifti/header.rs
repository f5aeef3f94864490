//! NIfTI-1 header parsing.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use crate::errors::VolumeError;
use crate::volume::{ByteOrder, DataType, VolumeShape};

/// Size of a NIfTI-1 header in bytes.
pub const HEADER_SIZE: usize = 348;

/// Header plus the 4-byte extender; voxel data can never start earlier.
pub const MIN_DATA_OFFSET: u64 = 352;

const NIFTI2_HEADER_SIZE: i32 = 540;

/// NIfTI-1 header field byte offsets.
mod offsets {
    pub const SIZEOF_HDR: usize = 0;
    pub const DIM: usize = 40;
    pub const DATATYPE: usize = 70;
    pub const BITPIX: usize = 72;
    pub const PIXDIM: usize = 76;
    pub const VOX_OFFSET: usize = 108;
    pub const SCL_SLOPE: usize = 112;
    pub const SCL_INTER: usize = 116;
    pub const DESCRIP: usize = 148;
    pub const DESCRIP_LEN: usize = 80;
    pub const MAGIC: usize = 344;
}

const MAGIC_SINGLE: &[u8; 4] = b"n+1\0";
const MAGIC_PAIR: &[u8; 4] = b"ni1\0";

/// The header fields the engine needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NiftiHeader {
    pub byte_order: ByteOrder,
    pub dim: [i16; 8],
    pub datatype: i16,
    pub bitpix: i16,
    pub pixdim: [f32; 8],
    pub vox_offset: f32,
    pub scl_slope: f32,
    pub scl_inter: f32,
    pub descrip: String,
}

impl NiftiHeader {
    /// Parse the first 348 bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, VolumeError> {
        if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
            return Err(VolumeError::UnsupportedFormat(
                "gzip-compressed volumes are not supported".to_string(),
            ));
        }
        if bytes.len() < HEADER_SIZE {
            return Err(VolumeError::InvalidHeader(format!(
                "file is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                HEADER_SIZE
            )));
        }

        let sizeof_le = LittleEndian::read_i32(&bytes[offsets::SIZEOF_HDR..4]);
        let sizeof_be = BigEndian::read_i32(&bytes[offsets::SIZEOF_HDR..4]);
        match (sizeof_le, sizeof_be) {
            (348, _) => Self::parse_with::<LittleEndian>(bytes, ByteOrder::Little),
            (_, 348) => Self::parse_with::<BigEndian>(bytes, ByteOrder::Big),
            (NIFTI2_HEADER_SIZE, _) | (_, NIFTI2_HEADER_SIZE) => Err(VolumeError::UnsupportedFormat(
                "NIfTI-2 headers are not supported".to_string(),
            )),
            _ => Err(VolumeError::InvalidHeader(format!(
                "sizeof_hdr is {} (byte-swapped {}), expected 348",
                sizeof_le, sizeof_be
            ))),
        }
    }

    fn parse_with<E: Endian>(bytes: &[u8], byte_order: ByteOrder) -> Result<Self, VolumeError> {
        let magic = &bytes[offsets::MAGIC..offsets::MAGIC + 4];
        if magic == MAGIC_PAIR {
            return Err(VolumeError::UnsupportedFormat(
                "split .hdr/.img pairs are not supported".to_string(),
            ));
        }
        if magic != MAGIC_SINGLE {
            return Err(VolumeError::InvalidHeader(format!(
                "bad magic {:?}, expected \"n+1\"",
                String::from_utf8_lossy(magic)
            )));
        }

        let read_i16 = |at: usize| E::read_i16(&bytes[at..at + 2]);
        let read_f32 = |at: usize| E::read_f32(&bytes[at..at + 4]);

        let mut dim = [0i16; 8];
        let mut pixdim = [0f32; 8];
        for i in 0..8 {
            dim[i] = read_i16(offsets::DIM + 2 * i);
            pixdim[i] = read_f32(offsets::PIXDIM + 4 * i);
        }

        let descrip_raw = &bytes[offsets::DESCRIP..offsets::DESCRIP + offsets::DESCRIP_LEN];
        let descrip_end = descrip_raw.iter().position(|&b| b == 0).unwrap_or(descrip_raw.len());
        let descrip = String::from_utf8_lossy(&descrip_raw[..descrip_end]).trim().to_string();

        Ok(Self {
            byte_order,
            dim,
            datatype: read_i16(offsets::DATATYPE),
            bitpix: read_i16(offsets::BITPIX),
            pixdim,
            vox_offset: read_f32(offsets::VOX_OFFSET),
            scl_slope: read_f32(offsets::SCL_SLOPE),
            scl_inter: read_f32(offsets::SCL_INTER),
            descrip,
        })
    }

    /// Resolve the voxel type; `bitpix` must agree with `datatype`.
    pub fn data_type(&self) -> Result<DataType, VolumeError> {
        match DataType::from_code(self.datatype) {
            Some(dt) if dt.bitpix() == self.bitpix => Ok(dt),
            _ => Err(VolumeError::UnsupportedDatatype {
                code: self.datatype,
                bitpix: self.bitpix,
            }),
        }
    }

    /// Map `dim` onto (x, y, z, t). Missing trailing axes are 1; axes 5-7
    /// must be singleton.
    pub fn shape(&self) -> Result<VolumeShape, VolumeError> {
        let ndim = self.dim[0];
        let invalid = |message: &str| VolumeError::InvalidDimensions {
            dims: self.dim.iter().map(|&d| i64::from(d)).collect(),
            message: message.to_string(),
        };

        if !(1..=7).contains(&ndim) {
            return Err(invalid("dim[0] must be between 1 and 7"));
        }
        let ndim = ndim as usize;
        if self.dim[1..=ndim].iter().any(|&d| d < 1) {
            return Err(invalid("every used dimension must be at least 1"));
        }
        if ndim > 4 && self.dim[5..=ndim].iter().any(|&d| d != 1) {
            return Err(invalid("dimensions beyond time are not supported"));
        }

        let axis = |i: usize| if i <= ndim { self.dim[i] as usize } else { 1 };
        Ok(VolumeShape::new(axis(1), axis(2), axis(3), axis(4)))
    }
}
