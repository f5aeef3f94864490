//! Volume types - shape, voxel element types, and decode metadata.

use std::fmt;

use ndarray::{Array4, ArrayView4, ShapeBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::VolumeError;

/// NIfTI-1 datatype codes for the voxel types the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    UInt8,
    Int16,
    Int8,
    UInt16,
}

impl DataType {
    /// Map a header `datatype` code to a supported type.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            2 => Some(Self::UInt8),
            4 => Some(Self::Int16),
            256 => Some(Self::Int8),
            512 => Some(Self::UInt16),
            _ => None,
        }
    }

    pub fn code(self) -> i16 {
        match self {
            Self::UInt8 => 2,
            Self::Int16 => 4,
            Self::Int8 => 256,
            Self::UInt16 => 512,
        }
    }

    pub fn bytes_per_voxel(self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 => 1,
            Self::Int16 | Self::UInt16 => 2,
        }
    }

    pub fn bitpix(self) -> i16 {
        (self.bytes_per_voxel() * 8) as i16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::Int8 => "int8",
            Self::UInt16 => "uint16",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored voxel value.
///
/// Only types whose widest possible difference squares into 33 bits are
/// implemented, so an `i64` accumulator cannot overflow for any frame that
/// fits in memory.
pub trait Voxel: Copy + Send + Sync + fmt::Debug + PartialEq + 'static {
    const DATATYPE: DataType;

    /// Widen to the accumulator type.
    fn widen(self) -> i64;
}

macro_rules! impl_voxel {
    ($($ty:ty => $dt:ident),* $(,)?) => {
        $(
            impl Voxel for $ty {
                const DATATYPE: DataType = DataType::$dt;

                #[inline(always)]
                fn widen(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_voxel!(u8 => UInt8, i16 => Int16, i8 => Int8, u16 => UInt16);

/// Extent of a volume along (x, y, z, t).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeShape {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub t: usize,
}

impl VolumeShape {
    pub fn new(x: usize, y: usize, z: usize, t: usize) -> Self {
        Self { x, y, z, t }
    }

    /// Number of voxels in one 3D frame.
    pub fn voxels_per_frame(&self) -> usize {
        self.x * self.y * self.z
    }

    pub fn total_voxels(&self) -> usize {
        self.voxels_per_frame() * self.t
    }

    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.x, self.y, self.z, self.t)
    }
}

impl fmt::Display for VolumeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.t)
    }
}

/// Immutable 4D voxel array indexed as `[(x, y, z, t)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T: Voxel> {
    data: Array4<T>,
}

impl<T: Voxel> Volume<T> {
    /// Wrap an existing array in any memory layout.
    pub fn new(data: Array4<T>) -> Self {
        Self { data }
    }

    /// Build from a buffer in file order: x varies fastest, t slowest.
    pub fn from_fortran_vec(shape: VolumeShape, voxels: Vec<T>) -> Result<Self, VolumeError> {
        let len = voxels.len();
        let data = Array4::from_shape_vec(shape.as_tuple().f(), voxels).map_err(|e| {
            VolumeError::InvalidDimensions {
                dims: vec![shape.x as i64, shape.y as i64, shape.z as i64, shape.t as i64],
                message: format!("{} voxels do not fill the shape: {}", len, e),
            }
        })?;
        Ok(Self { data })
    }

    pub fn shape(&self) -> VolumeShape {
        let (x, y, z, t) = self.data.dim();
        VolumeShape { x, y, z, t }
    }

    pub fn frames(&self) -> usize {
        self.data.dim().3
    }

    pub fn view(&self) -> ArrayView4<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array4<T> {
        self.data
    }
}

/// Byte order of the on-disk header and voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Little,
    Big,
}

/// How the voxel data offset was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetSource {
    /// The header's `vox_offset` field.
    Declared,
    /// End of the header extension chain.
    Extensions,
    /// Voxel data assumed to occupy the tail of the file.
    Trailing,
    /// Volume built in memory; no file involved.
    InMemory,
}

impl OffsetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::Extensions => "extensions",
            Self::Trailing => "trailing",
            Self::InMemory => "in_memory",
        }
    }
}

/// Facts about where a volume came from and how it was decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetadata {
    pub datatype: DataType,
    pub byte_order: ByteOrder,
    /// `vox_offset` as written in the header.
    pub declared_offset: f32,
    /// Offset the voxels were actually read from.
    pub data_offset: u64,
    pub offset_source: OffsetSource,
    pub extension_count: usize,
    pub extension_bytes: u64,
    pub pixdim: [f32; 4],
    pub scl_slope: f32,
    pub scl_inter: f32,
    pub description: String,
}

impl VolumeMetadata {
    /// Metadata for a volume that never touched disk.
    pub fn in_memory(datatype: DataType) -> Self {
        Self {
            datatype,
            byte_order: ByteOrder::Little,
            declared_offset: 0.0,
            data_offset: 0,
            offset_source: OffsetSource::InMemory,
            extension_count: 0,
            extension_bytes: 0,
            pixdim: [1.0; 4],
            scl_slope: 1.0,
            scl_inter: 0.0,
            description: String::new(),
        }
    }

    /// True when `scl_slope`/`scl_inter` would change stored values.
    /// A slope of 0 means "no scaling" in NIfTI-1.
    pub fn has_scaling(&self) -> bool {
        let slope_is_identity = self.scl_slope == 0.0 || self.scl_slope == 1.0;
        !(slope_is_identity && self.scl_inter == 0.0)
    }
}
