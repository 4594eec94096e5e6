//! Per-axis bounds of the materialized lattice and their growth rule.

use crate::error::{Error, Result};

/// Extent of one axis.
///
/// Valid coordinates on the axis are `-neg..pos`: `neg` counts the cells strictly
/// below zero and `pos` counts the cells at or above zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisBound {
    pub neg: u32,
    pub pos: u32,
}

impl AxisBound {
    pub fn new(neg: u32, pos: u32) -> Self {
        AxisBound { neg, pos }
    }

    /// Number of cells along this axis.
    #[inline]
    pub fn len(&self) -> usize {
        self.neg as usize + self.pos as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest valid coordinate on this axis.
    #[inline]
    pub fn min(&self) -> i64 {
        -(self.neg as i64)
    }

    /// One past the largest valid coordinate on this axis.
    #[inline]
    pub fn max(&self) -> i64 {
        self.pos as i64
    }

    #[inline]
    pub fn contains(&self, c: i32) -> bool {
        let c = c as i64;
        c >= self.min() && c < self.max()
    }

    /// Whether every coordinate on this axis fits in an `i32`.
    #[inline]
    pub fn fits_i32(&self) -> bool {
        self.min() >= i32::MIN as i64 && self.max() - 1 <= i32::MAX as i64
    }

    /// Widen the axis by one cell on each side, or `None` on overflow.
    #[inline]
    pub fn grow(&self) -> Option<Self> {
        Some(AxisBound {
            neg: self.neg.checked_add(1)?,
            pos: self.pos.checked_add(1)?,
        })
    }
}

/// The materialized extent of an N-dimensional lattice, one bound per axis.
///
/// The number of axes is fixed for the lifetime of a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    axes: Vec<AxisBound>,
}

impl Region {
    /// Build a region from explicit axis bounds. Needs at least one axis.
    pub fn new(axes: Vec<AxisBound>) -> Result<Self> {
        if axes.is_empty() {
            return Err(Error::TooFewDimensions { dimensions: 0 });
        }
        Region::checked(axes)
    }

    /// Reject regions whose cell count overflows `usize` or whose coordinates
    /// leave the `i32` range.
    fn checked(axes: Vec<AxisBound>) -> Result<Self> {
        if !axes.iter().all(AxisBound::fits_i32) {
            return Err(Error::RegionTooLarge);
        }
        let region = Region { axes };
        region.checked_size().ok_or(Error::RegionTooLarge)?;
        Ok(region)
    }

    /// Region covering a `width` x `height` pattern on axes 0 and 1, with every
    /// further axis one cell wide at coordinate 0.
    pub fn seed(dimensions: usize, width: u32, height: u32) -> Result<Self> {
        if dimensions < 2 {
            return Err(Error::TooFewDimensions { dimensions });
        }
        let mut axes = vec![AxisBound::new(0, 1); dimensions];
        axes[0] = AxisBound::new(0, width);
        axes[1] = AxisBound::new(0, height);
        Region::new(axes)
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    #[inline]
    pub fn axes(&self) -> &[AxisBound] {
        &self.axes
    }

    /// Total cell count, or `None` if it overflows `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        self.axes
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(axis.len()))
    }

    /// Total cell count.
    ///
    /// Panics if the count overflows; regions built by `new` and `grow` are checked
    /// for that up front.
    pub fn size(&self) -> usize {
        match self.checked_size() {
            Some(size) => size,
            None => panic!("region {:?} has more cells than fit in usize", self.axes),
        }
    }

    /// Whether `coord` lies inside the region. Coordinates with the wrong number of
    /// axes are never inside.
    pub fn contains(&self, coord: &[i32]) -> bool {
        coord.len() == self.axes.len()
            && self
                .axes
                .iter()
                .zip(coord)
                .all(|(axis, &c)| axis.contains(c))
    }

    /// The region one generation later: every axis grows by one cell in each direction.
    pub fn grow(&self) -> Result<Self> {
        let axes = self
            .axes
            .iter()
            .map(AxisBound::grow)
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::RegionTooLarge)?;
        Region::checked(axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seed_region_shape() {
        let region = Region::seed(4, 3, 5).unwrap();
        assert_eq!(region.dimensions(), 4);
        assert_eq!(region.axes()[0], AxisBound::new(0, 3));
        assert_eq!(region.axes()[1], AxisBound::new(0, 5));
        assert_eq!(region.axes()[2], AxisBound::new(0, 1));
        assert_eq!(region.axes()[3], AxisBound::new(0, 1));
        assert_eq!(region.size(), 15);
    }

    #[test]
    fn test_seed_needs_two_axes() {
        assert_eq!(
            Region::seed(1, 3, 3),
            Err(Error::TooFewDimensions { dimensions: 1 })
        );
        assert_eq!(
            Region::new(Vec::new()),
            Err(Error::TooFewDimensions { dimensions: 0 })
        );
    }

    #[test]
    fn test_grow_adds_one_each_side() {
        let region = Region::seed(3, 3, 3).unwrap();
        let grown = region.grow().unwrap();
        assert_eq!(grown.axes()[0], AxisBound::new(1, 4));
        assert_eq!(grown.axes()[2], AxisBound::new(1, 2));
        assert_eq!(grown.size(), 5 * 5 * 3);
    }

    #[test]
    fn test_contains_edges() {
        let region = Region::new(vec![AxisBound::new(2, 3), AxisBound::new(0, 1)]).unwrap();
        assert!(region.contains(&[-2, 0]));
        assert!(region.contains(&[2, 0]));
        assert!(!region.contains(&[-3, 0]));
        assert!(!region.contains(&[3, 0]));
        assert!(!region.contains(&[0, 1]));
        assert!(!region.contains(&[0, -1]));
        // Wrong axis count
        assert!(!region.contains(&[0]));
    }

    #[test]
    fn test_region_too_large() {
        let axes = vec![AxisBound::new(u32::MAX, u32::MAX); 8];
        assert_eq!(Region::new(axes), Err(Error::RegionTooLarge));
    }

    #[test]
    fn test_grow_at_u32_limit() {
        assert_eq!(AxisBound::new(0, u32::MAX).grow(), None);
        assert_eq!(AxisBound::new(u32::MAX, 0).grow(), None);

        // Largest extents whose coordinates all fit in i32
        let edge = AxisBound::new(1 << 31, 1 << 31);
        assert!(edge.fits_i32());
        let region = Region::new(vec![edge]).unwrap();
        assert_eq!(region.grow(), Err(Error::RegionTooLarge));
    }

    #[test]
    fn test_extents_outside_i32_rejected() {
        assert_eq!(
            Region::new(vec![AxisBound::new(0, u32::MAX)]),
            Err(Error::RegionTooLarge)
        );
        assert_eq!(
            Region::new(vec![AxisBound::new((1 << 31) + 1, 0)]),
            Err(Error::RegionTooLarge)
        );
        assert!(!AxisBound::new(0, (1 << 31) + 1).fits_i32());
    }

    proptest! {
        #[test]
        fn proptest_growth_after_k_steps(
            axes in prop::collection::vec((0u32..5, 0u32..5), 1..5),
            k in 0u32..6,
        ) {
            let start = Region::new(axes.iter().map(|&(n, p)| AxisBound::new(n, p)).collect()).unwrap();
            let mut region = start.clone();
            for _ in 0..k {
                region = region.grow().unwrap();
            }
            for (before, after) in start.axes().iter().zip(region.axes()) {
                prop_assert_eq!(after.neg, before.neg + k);
                prop_assert_eq!(after.pos, before.pos + k);
            }
        }
    }
}
