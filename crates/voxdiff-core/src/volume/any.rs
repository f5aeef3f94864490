//! Runtime-typed volume, for sources that only learn the voxel type on decode.

use super::types::{DataType, Volume, VolumeShape};

/// A volume of any supported voxel type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVolume {
    UInt8(Volume<u8>),
    Int16(Volume<i16>),
    Int8(Volume<i8>),
    UInt16(Volume<u16>),
}

impl AnyVolume {
    pub fn shape(&self) -> VolumeShape {
        match self {
            Self::UInt8(v) => v.shape(),
            Self::Int16(v) => v.shape(),
            Self::Int8(v) => v.shape(),
            Self::UInt16(v) => v.shape(),
        }
    }

    pub fn datatype(&self) -> DataType {
        match self {
            Self::UInt8(_) => DataType::UInt8,
            Self::Int16(_) => DataType::Int16,
            Self::Int8(_) => DataType::Int8,
            Self::UInt16(_) => DataType::UInt16,
        }
    }
}

impl From<Volume<u8>> for AnyVolume {
    fn from(v: Volume<u8>) -> Self {
        Self::UInt8(v)
    }
}

impl From<Volume<i16>> for AnyVolume {
    fn from(v: Volume<i16>) -> Self {
        Self::Int16(v)
    }
}

impl From<Volume<i8>> for AnyVolume {
    fn from(v: Volume<i8>) -> Self {
        Self::Int8(v)
    }
}

impl From<Volume<u16>> for AnyVolume {
    fn from(v: Volume<u16>) -> Self {
        Self::UInt16(v)
    }
}
