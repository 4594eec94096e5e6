//! Box extraction and import operations.
//!
//! A box is the half-open hyper-rectangle `[min, max)`. Its cells are copied to
//! and from flat byte buffers in the same mixed-radix order the field uses: axis 0
//! changes slowest and the last axis fastest.

use super::field::{field_get, field_set, Field};
use crate::error::{Error, Result};

fn check_axes(field: &Field, min: &[i32], max: &[i32]) -> Result<()> {
    for found in [min.len(), max.len()] {
        if found != field.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: field.dimensions(),
                found,
            });
        }
    }
    Ok(())
}

/// Number of cells in the box, or `None` if it is empty or too large.
fn box_size(min: &[i32], max: &[i32]) -> Option<usize> {
    min.iter().zip(max).try_fold(1usize, |acc, (&lo, &hi)| {
        let len = hi as i64 - lo as i64;
        if len <= 0 {
            None
        } else {
            acc.checked_mul(usize::try_from(len).ok()?)
        }
    })
}

/// Walk every coordinate of a non-empty box in mixed-radix order.
fn for_each_in_box(min: &[i32], max: &[i32], mut f: impl FnMut(&[i32])) {
    let mut coord = min.to_vec();
    loop {
        f(&coord);

        // Odometer step, last axis fastest
        let mut axis = coord.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            coord[axis] += 1;
            if coord[axis] < max[axis] {
                break;
            }
            coord[axis] = min[axis];
        }
    }
}

/// Extract the box `[min, max)` from the field into a flat buffer.
///
/// # Layout
/// One byte per cell, 0 = dead and 1 = alive. Cells of the box outside the
/// field's region read as dead.
///
/// # Returns
/// Number of bytes written to the buffer, or 0 if the box is empty or the buffer
/// is too small.
pub fn extract_region(field: &Field, min: &[i32], max: &[i32], out_buf: &mut [u8]) -> Result<usize> {
    check_axes(field, min, max)?;

    let total_size = match box_size(min, max) {
        Some(size) => size,
        None => return Ok(0),
    };
    if out_buf.len() < total_size {
        return Ok(0);
    }

    let mut offset = 0;
    for_each_in_box(min, max, |coord| {
        out_buf[offset] = field_get(field, coord) as u8;
        offset += 1;
    });

    Ok(offset)
}

/// Import the box `[min, max)` from a flat buffer into the field.
///
/// # Layout
/// The buffer is expected in the order `extract_region` writes. Any non-zero byte
/// is alive. Cells of the box outside the field's region are skipped.
///
/// # Returns
/// Number of bytes read from the buffer, or 0 if the box is empty or the buffer is
/// too short.
pub fn import_region(field: &mut Field, min: &[i32], max: &[i32], in_buf: &[u8]) -> Result<usize> {
    check_axes(field, min, max)?;

    let total_size = match box_size(min, max) {
        Some(size) => size,
        None => return Ok(0),
    };
    if in_buf.len() < total_size {
        return Ok(0);
    }

    let mut offset = 0;
    for_each_in_box(min, max, |coord| {
        field_set(field, coord, in_buf[offset] != 0);
        offset += 1;
    });

    Ok(offset)
}
