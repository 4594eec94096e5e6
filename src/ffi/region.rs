//! Box extraction and import FFI functions.

use super::coord_arg;
use crate::automaton::{self, Field};

/// Number of cells in the box `[min, max)`, 0 if empty or too large.
fn box_len(min: &[i32], max: &[i32]) -> usize {
    min.iter()
        .zip(max)
        .try_fold(1usize, |acc, (&lo, &hi)| {
            let len = usize::try_from(hi as i64 - lo as i64).ok()?;
            acc.checked_mul(len)
        })
        .unwrap_or(0)
}

/// Extracts the box `[min, max)` of cells into a flat output buffer.
///
/// # Layout
/// One byte per cell (0 dead, 1 alive), axis 0 slowest and the last axis fastest.
/// This matches the layout expected by `ha_import_region`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
/// - `min` and `max` must each point to `dimensions` readable `i32`s
/// - `out_buf` must point to at least `out_len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ha_extract_region(
    ptr: *const Field,
    min: *const i32,
    max: *const i32,
    dimensions: usize,
    out_buf: *mut u8,
    out_len: usize,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }
    let (min, max) = match (coord_arg(min, dimensions), coord_arg(max, dimensions)) {
        (Some(min), Some(max)) => (min, max),
        _ => return 0,
    };

    let out = std::slice::from_raw_parts_mut(out_buf, out_len.min(box_len(min, max)));
    match automaton::extract_region(&*ptr, min, max, out) {
        Ok(written) => written as u64,
        Err(err) => {
            log::warn!("ha_extract_region: {}", err);
            0
        }
    }
}

/// Imports the box `[min, max)` of cells from a flat buffer.
///
/// # Layout
/// The buffer is expected in the order `ha_extract_region` writes.
/// Input values are normalized: 0 = dead, non-zero = alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
/// - `min` and `max` must each point to `dimensions` readable `i32`s
/// - `in_buf` must point to at least `in_len` readable bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn ha_import_region(
    ptr: *mut Field,
    min: *const i32,
    max: *const i32,
    dimensions: usize,
    in_buf: *const u8,
    in_len: usize,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }
    let (min, max) = match (coord_arg(min, dimensions), coord_arg(max, dimensions)) {
        (Some(min), Some(max)) => (min, max),
        _ => return 0,
    };

    let input = std::slice::from_raw_parts(in_buf, in_len.min(box_len(min, max)));
    match automaton::import_region(&mut *ptr, min, max, input) {
        Ok(read) => read as u64,
        Err(err) => {
            log::warn!("ha_import_region: {}", err);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::field::{ha_field_alive_count, ha_field_get};
    use crate::ffi::lifecycle::{ha_create_field, ha_destroy_field};
    use std::ffi::CString;
    use std::ptr;

    fn create(seed: &str, dimensions: u32) -> *mut Field {
        let seed = CString::new(seed).unwrap();
        unsafe { ha_create_field(seed.as_ptr(), dimensions) }
    }

    #[test]
    fn test_extract_region() {
        let field = create(".#.\n..#\n###", 3);
        let mut buffer = vec![0u8; 9];
        unsafe {
            let written = ha_extract_region(
                field,
                [0, 0, 0].as_ptr(),
                [3, 3, 1].as_ptr(),
                3,
                buffer.as_mut_ptr(),
                buffer.len(),
            );
            assert_eq!(written, 9);
            ha_destroy_field(field);
        }

        // Axis 0 (column) slowest: (0,0) (0,1) (0,2) (1,0) ...
        assert_eq!(buffer, vec![0, 0, 1, 1, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_extract_region_short_buffer() {
        let field = create("##\n##", 2);
        let mut buffer = vec![0u8; 3];
        unsafe {
            let written = ha_extract_region(
                field,
                [0, 0].as_ptr(),
                [2, 2].as_ptr(),
                2,
                buffer.as_mut_ptr(),
                buffer.len(),
            );
            assert_eq!(written, 0);
            ha_destroy_field(field);
        }
    }

    #[test]
    fn test_import_region() {
        let field = create("...\n...\n...", 2);
        let buffer = [0u8, 1, 0, 0, 0, 7];
        unsafe {
            let read = ha_import_region(
                field,
                [0, 0].as_ptr(),
                [2, 3].as_ptr(),
                2,
                buffer.as_ptr(),
                buffer.len(),
            );
            assert_eq!(read, 6);
            assert_eq!(ha_field_alive_count(field), 2);
            assert_eq!(ha_field_get(field, [0, 1].as_ptr(), 2), 1);
            assert_eq!(ha_field_get(field, [1, 2].as_ptr(), 2), 1);
            ha_destroy_field(field);
        }
    }

    #[test]
    fn test_null_pointers() {
        let mut buffer = vec![0u8; 4];
        unsafe {
            assert_eq!(
                ha_extract_region(
                    ptr::null(),
                    [0, 0].as_ptr(),
                    [2, 2].as_ptr(),
                    2,
                    buffer.as_mut_ptr(),
                    4
                ),
                0
            );
            assert_eq!(
                ha_import_region(ptr::null_mut(), ptr::null(), ptr::null(), 2, buffer.as_ptr(), 4),
                0
            );
        }
    }
}
