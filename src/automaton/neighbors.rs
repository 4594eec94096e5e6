//! Moore (Chebyshev distance 1) neighborhood in any number of dimensions.
//!
//! Offsets are walked like an odometer with digits -1, 0, +1: the last axis
//! turns fastest and a wrap past +1 carries into the previous axis. This visits
//! all 3^N offsets in O(N) memory without recursion.

use super::bounds::Region;
use super::field::Field;
use super::grid::try_index_of;

/// Iterator over the `3^N - 1` neighbors of a coordinate.
pub struct Neighbors<'a> {
    center: &'a [i32],
    offset: Vec<i32>,
    done: bool,
}

impl<'a> Neighbors<'a> {
    pub fn new(center: &'a [i32]) -> Self {
        Neighbors {
            center,
            offset: vec![-1; center.len()],
            done: center.is_empty(),
        }
    }

    /// Current neighbor written into `out` (length N).
    fn write_current(&self, out: &mut [i32]) {
        for ((slot, &c), &d) in out.iter_mut().zip(self.center).zip(&self.offset) {
            *slot = c + d;
        }
    }

    /// Turn the odometer by one. Returns false once every axis has wrapped.
    fn advance(&mut self) -> bool {
        for digit in self.offset.iter_mut().rev() {
            if *digit == 1 {
                *digit = -1;
            } else {
                *digit += 1;
                return true;
            }
        }
        false
    }

    /// Like `Iterator::next`, but reuses `out` instead of allocating.
    pub fn next_into(&mut self, out: &mut [i32]) -> bool {
        while !self.done {
            let is_center = self.offset.iter().all(|&d| d == 0);
            if !is_center {
                self.write_current(out);
            }
            self.done = !self.advance();
            if !is_center {
                return true;
            }
        }
        false
    }
}

impl Iterator for Neighbors<'_> {
    type Item = Vec<i32>;

    fn next(&mut self) -> Option<Vec<i32>> {
        let mut out = vec![0; self.center.len()];
        if self.next_into(&mut out) {
            Some(out)
        } else {
            None
        }
    }
}

/// Enumerate the neighbors of `coord`.
pub fn neighbors(coord: &[i32]) -> Neighbors<'_> {
    Neighbors::new(coord)
}

/// Count alive neighbors of `coord` in `cells` laid out over `region`, using
/// `scratch` (length N) for the neighbor coordinate. Neighbors outside `region`
/// are dead.
pub fn count_live_neighbors(
    region: &Region,
    cells: &[bool],
    coord: &[i32],
    scratch: &mut [i32],
) -> usize {
    let mut iter = Neighbors::new(coord);
    let mut count = 0;

    while iter.next_into(scratch) {
        if let Some(idx) = try_index_of(region, scratch) {
            if cells[idx] {
                count += 1;
            }
        }
    }

    count
}

/// Count alive neighbors of `coord` in `field`. Neighbors outside the field's
/// region are dead.
pub fn count_neighbors(field: &Field, coord: &[i32]) -> usize {
    let mut scratch = vec![0; coord.len()];
    count_live_neighbors(&field.region, &field.cells, coord, &mut scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::field::{create_field, field_set};
    use crate::automaton::bounds::{AxisBound, Region};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_neighbor_counts_by_dimension() {
        assert_eq!(neighbors(&[0]).count(), 2);
        assert_eq!(neighbors(&[0, 0]).count(), 8);
        assert_eq!(neighbors(&[0, 0, 0]).count(), 26);
        assert_eq!(neighbors(&[0, 0, 0, 0]).count(), 80);
    }

    #[test]
    fn test_neighbors_order_1d() {
        let all: Vec<_> = neighbors(&[5]).collect();
        assert_eq!(all, vec![vec![4], vec![6]]);
    }

    #[test]
    fn test_neighbors_order_2d() {
        let all: Vec<_> = neighbors(&[0, 0]).collect();
        assert_eq!(
            all,
            vec![
                vec![-1, -1],
                vec![-1, 0],
                vec![-1, 1],
                vec![0, -1],
                vec![0, 1],
                vec![1, -1],
                vec![1, 0],
                vec![1, 1],
            ]
        );
    }

    #[test]
    fn test_no_axes_no_neighbors() {
        assert_eq!(neighbors(&[]).count(), 0);
    }

    #[test]
    fn test_count_neighbors() {
        let region = Region::new(vec![AxisBound::new(0, 8); 3]).unwrap();
        let mut field = create_field(region);

        // Cross pattern: center + 4 neighbors
        field_set(&mut field, &[4, 4, 4], true);
        field_set(&mut field, &[3, 4, 4], true);
        field_set(&mut field, &[5, 4, 4], true);
        field_set(&mut field, &[4, 3, 4], true);
        field_set(&mut field, &[4, 5, 4], true);

        // Center should have 4 neighbors (left, right, front, back)
        assert_eq!(count_neighbors(&field, &[4, 4, 4]), 4);

        // Each arm sees the center plus the two arms diagonal to it
        assert_eq!(count_neighbors(&field, &[3, 4, 4]), 3);
        assert_eq!(count_neighbors(&field, &[4, 5, 4]), 3);

        // Far cell should have 0 neighbors
        assert_eq!(count_neighbors(&field, &[0, 0, 0]), 0);
    }

    #[test]
    fn test_count_neighbors_outside_region_is_dead() {
        let region = Region::new(vec![AxisBound::new(0, 2); 2]).unwrap();
        let mut field = create_field(region);
        for coord in [[0, 0], [0, 1], [1, 0], [1, 1]] {
            field_set(&mut field, &coord, true);
        }

        // Corner of a full 2x2 block
        assert_eq!(count_neighbors(&field, &[0, 0]), 3);
        // Outside the region entirely, touching one corner
        assert_eq!(count_neighbors(&field, &[-1, -1]), 1);
        assert_eq!(count_neighbors(&field, &[5, 5]), 0);
    }

    proptest! {
        #[test]
        fn proptest_neighbor_completeness(center in prop::collection::vec(-1000i32..1000, 1..6)) {
            let all: Vec<Vec<i32>> = neighbors(&center).collect();
            let expected = 3usize.pow(center.len() as u32) - 1;
            prop_assert_eq!(all.len(), expected);

            let distinct: HashSet<&Vec<i32>> = all.iter().collect();
            prop_assert_eq!(distinct.len(), expected);

            for n in &all {
                prop_assert_ne!(n, &center);
                prop_assert!(n.iter().zip(&center).all(|(a, b)| (a - b).abs() <= 1));
            }
        }
    }
}
