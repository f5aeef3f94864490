//! Shared fixtures: synthetic single-file NIfTI-1 images.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use voxdiff_core::volume::ByteOrder;
use voxdiff_core::{DataType, VolumeShape};

/// Builder for a `.nii` byte image with full control over the fields the
/// decoder cares about.
#[derive(Debug, Clone)]
pub struct NiftiFixture {
    pub shape: VolumeShape,
    pub datatype: DataType,
    /// Voxels in file order (x fastest).
    pub voxels: Vec<i64>,
    pub byte_order: ByteOrder,
    /// `None` writes the correct offset.
    pub vox_offset: Option<f32>,
    pub extension_sizes: Vec<usize>,
    pub trailing_bytes: usize,
    pub scl_slope: f32,
}

impl NiftiFixture {
    pub fn new(shape: VolumeShape, datatype: DataType, voxels: Vec<i64>) -> Self {
        assert_eq!(voxels.len(), shape.total_voxels());
        Self {
            shape,
            datatype,
            voxels,
            byte_order: ByteOrder::Little,
            vox_offset: None,
            extension_sizes: Vec::new(),
            trailing_bytes: 0,
            scl_slope: 1.0,
        }
    }

    pub fn int16(shape: VolumeShape, voxels: &[i16]) -> Self {
        Self::new(shape, DataType::Int16, voxels.iter().map(|&v| i64::from(v)).collect())
    }

    pub fn big_endian(mut self) -> Self {
        self.byte_order = ByteOrder::Big;
        self
    }

    pub fn vox_offset(mut self, offset: f32) -> Self {
        self.vox_offset = Some(offset);
        self
    }

    pub fn extensions(mut self, sizes: &[usize]) -> Self {
        self.extension_sizes = sizes.to_vec();
        self
    }

    pub fn trailing(mut self, bytes: usize) -> Self {
        self.trailing_bytes = bytes;
        self
    }

    pub fn scl_slope(mut self, slope: f32) -> Self {
        self.scl_slope = slope;
        self
    }

    /// Offset at which voxel data is actually written.
    pub fn true_offset(&self) -> usize {
        352 + self.extension_sizes.iter().sum::<usize>()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self.byte_order {
            ByteOrder::Little => self.encode::<LittleEndian>(),
            ByteOrder::Big => self.encode::<BigEndian>(),
        }
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }

    fn encode<E: Endian>(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; 352];
        E::write_i32(&mut bytes[0..4], 348);

        let dims = [4i16, self.shape.x as i16, self.shape.y as i16, self.shape.z as i16, self.shape.t as i16, 1, 1, 1];
        for (i, d) in dims.iter().enumerate() {
            E::write_i16(&mut bytes[40 + 2 * i..42 + 2 * i], *d);
        }
        E::write_i16(&mut bytes[70..72], self.datatype.code());
        E::write_i16(&mut bytes[72..74], self.datatype.bitpix());
        for i in 0..8 {
            E::write_f32(&mut bytes[76 + 4 * i..80 + 4 * i], 1.0);
        }
        let offset = self.vox_offset.unwrap_or(self.true_offset() as f32);
        E::write_f32(&mut bytes[108..112], offset);
        E::write_f32(&mut bytes[112..116], self.scl_slope);
        bytes[148..155].copy_from_slice(b"fixture");
        bytes[344..348].copy_from_slice(b"n+1\0");

        if !self.extension_sizes.is_empty() {
            bytes[348] = 1;
        }
        for &size in &self.extension_sizes {
            let mut record = vec![0u8; size];
            E::write_i32(&mut record[0..4], size as i32);
            E::write_i32(&mut record[4..8], 6);
            bytes.extend_from_slice(&record);
        }

        for &v in &self.voxels {
            match self.datatype {
                DataType::UInt8 => bytes.push(v as u8),
                DataType::Int8 => bytes.push(v as i8 as u8),
                DataType::Int16 => {
                    let mut buf = [0u8; 2];
                    E::write_i16(&mut buf, v as i16);
                    bytes.extend_from_slice(&buf);
                }
                DataType::UInt16 => {
                    let mut buf = [0u8; 2];
                    E::write_u16(&mut buf, v as u16);
                    bytes.extend_from_slice(&buf);
                }
            }
        }
        bytes.extend(std::iter::repeat(0xAB).take(self.trailing_bytes));
        bytes
    }
}

/// Deterministic pseudo-random int16 voxels (LCG), spanning the full range.
pub fn lcg_voxels(count: usize, seed: u64) -> Vec<i16> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 48) as u16 as i16
        })
        .collect()
}
