//! Frame extraction.

use std::borrow::Cow;

use ndarray::Axis;

use crate::errors::SsdError;
use crate::volume::{Volume, Voxel};

/// Flatten frame `t` into `x*y*z` voxels, x varying fastest, then y, then z.
///
/// Volumes decoded from disk are Fortran-ordered, so each frame is one
/// contiguous run and is borrowed as-is. Any other layout is copied out in
/// the same voxel order, so positions line up across frames regardless of
/// how the array was built.
pub fn extract_frame<T: Voxel>(volume: &Volume<T>, t: usize) -> Result<Cow<'_, [T]>, SsdError> {
    let frames = volume.frames();
    if t >= frames {
        return Err(SsdError::IndexOutOfRange { index: t, frames });
    }

    let frame = volume.view().index_axis_move(Axis(3), t);
    // Transposed, an x-fastest frame is plain row-major.
    let xyz_order = frame.reversed_axes();
    match xyz_order.to_slice() {
        Some(slice) => Ok(Cow::Borrowed(slice)),
        None => Ok(Cow::Owned(xyz_order.iter().copied().collect())),
    }
}
