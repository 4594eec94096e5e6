//! Conversion between N-dimensional coordinates and linear cell indices.
//!
//! Cells are laid out in mixed-radix order: axis 0 changes slowest and the last
//! axis changes fastest, each axis shifted by its negative extent so digits are
//! never negative.

use super::bounds::Region;

/// Linear index of `coord` in `region`, or `None` if it lies outside.
///
/// Used wherever a position may fall outside the materialized region, such as
/// neighbor lookups against the previous generation. Never panics.
#[inline]
pub fn try_index_of(region: &Region, coord: &[i32]) -> Option<usize> {
    if coord.len() != region.dimensions() {
        return None;
    }

    let mut index = 0usize;
    for (axis, &c) in region.axes().iter().zip(coord) {
        let digit = c as i64 + axis.neg as i64;
        if digit < 0 || digit >= axis.len() as i64 {
            return None;
        }
        index = index * axis.len() + digit as usize;
    }
    Some(index)
}

/// Linear index of `coord` in `region`.
///
/// Only for coordinates already known to be inside the region. An outside
/// coordinate means the caller is broken, so this panics.
#[inline]
pub fn index_of(region: &Region, coord: &[i32]) -> usize {
    match try_index_of(region, coord) {
        Some(index) => index,
        None => panic!("coordinate {:?} is outside region {:?}", coord, region),
    }
}

/// Coordinate of the cell stored at `index` in `region`.
///
/// Inverse of `index_of` for every `index < region.size()`.
pub fn coord_of(region: &Region, index: usize) -> Vec<i32> {
    let mut coord = vec![0; region.dimensions()];
    coord_of_into(region, index, &mut coord);
    coord
}

/// Same as `coord_of`, writing into an existing buffer of length N.
#[inline]
pub fn coord_of_into(region: &Region, mut index: usize, coord: &mut [i32]) {
    debug_assert_eq!(coord.len(), region.dimensions());
    debug_assert!(index < region.size());

    for (axis, slot) in region.axes().iter().zip(coord.iter_mut()).rev() {
        let len = axis.len();
        *slot = ((index % len) as i64 - axis.neg as i64) as i32;
        index /= len;
    }
}

/// Check if a coordinate is within the region.
#[inline]
pub fn in_bounds(region: &Region, coord: &[i32]) -> bool {
    try_index_of(region, coord).is_some()
}
