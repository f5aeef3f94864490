//! Pairwise SSD kernels.
//!
//! Accumulator is `i64`: every voxel is widened before subtraction, so a
//! squared difference is at most (2^16 - 1)^2 and the sum stays exact for
//! any frame that fits in memory.

use ndarray::ArrayView4;

use crate::errors::SsdError;
use crate::volume::Voxel;

/// Σ (a[i] - b[i])² over two flattened frames.
///
/// One pass, difference and square inline; nothing is allocated.
#[inline]
pub fn pairwise_ssd<T: Voxel>(a: &[T], b: &[T]) -> Result<i64, SsdError> {
    if a.len() != b.len() {
        return Err(SsdError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).fold(0i64, |acc, (&x, &y)| {
        let diff = x.widen() - y.widen();
        acc + diff * diff
    }))
}

/// SSD between frame 0 and frame `t`, walking raw (x, y, z) coordinates of
/// the 4D array without flattening either frame.
pub fn nested_ssd<T: Voxel>(data: &ArrayView4<'_, T>, t: usize) -> Result<i64, SsdError> {
    let (nx, ny, nz, frames) = data.dim();
    if t >= frames {
        return Err(SsdError::IndexOutOfRange { index: t, frames });
    }

    let mut ssd = 0i64;
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let diff = data[(x, y, z, 0)].widen() - data[(x, y, z, t)].widen();
                ssd += diff * diff;
            }
        }
    }
    Ok(ssd)
}
