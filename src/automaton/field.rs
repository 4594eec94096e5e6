//! N-dimensional lattice of boolean cells over a bounded region.
//!
//! A field is built once from a 2D seed pattern and then replaced, never
//! mutated, by each generation step.

use super::bounds::Region;
use super::grid::{coord_of, index_of, try_index_of};
use crate::error::{Error, Result};

/// Cell states for one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub region: Region,
    pub cells: Vec<bool>, // one per cell of `region`, in mixed-radix order
    pub generation: u64,
}

impl Field {
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.region.dimensions()
    }
}

/// Initialize an all-dead field covering `region`.
pub fn create_field(region: Region) -> Field {
    let size = region.size();
    Field {
        region,
        cells: vec![false; size],
        generation: 0,
    }
}

/// Build a field from a 2D pattern, one string per row.
///
/// `#` is alive and any other character is dead. Column `x` of row `y` becomes the
/// cell `(x, y, 0, ..., 0)`. Rows may have different lengths; the field is as wide
/// as the longest row.
pub fn seed_field<I, S>(rows: I, dimensions: usize) -> Result<Field>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if dimensions < 2 {
        return Err(Error::TooFewDimensions { dimensions });
    }

    let rows: Vec<Vec<bool>> = rows
        .into_iter()
        .map(|row| row.as_ref().chars().map(|ch| ch == '#').collect())
        .collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();
    if width == 0 || height == 0 {
        return Err(Error::EmptySeed);
    }

    let width = u32::try_from(width).map_err(|_| Error::RegionTooLarge)?;
    let height = u32::try_from(height).map_err(|_| Error::RegionTooLarge)?;
    let mut field = create_field(Region::seed(dimensions, width, height)?);

    let mut coord = vec![0; dimensions];
    for (y, row) in rows.iter().enumerate() {
        for (x, &alive) in row.iter().enumerate() {
            coord[0] = x as i32;
            coord[1] = y as i32;
            let idx = index_of(&field.region, &coord);
            field.cells[idx] = alive;
        }
    }

    log::debug!(
        "seeded {}D field {}x{} with {} alive cells",
        dimensions,
        width,
        height,
        alive_count(&field)
    );
    Ok(field)
}

/// Parse a multi-line pattern.
///
/// Blank lines before the first and after the last non-blank line are dropped.
/// Every other line is a row as written, so whitespace inside it is dead cells.
pub fn seed_field_from_str(text: &str, dimensions: usize) -> Result<Field> {
    let lines: Vec<&str> = text.lines().collect();
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    seed_field(&lines[start..end], dimensions)
}

/// Set a cell. Coordinates outside the region are silently ignored.
pub fn field_set(field: &mut Field, coord: &[i32], alive: bool) {
    if let Some(idx) = try_index_of(&field.region, coord) {
        field.cells[idx] = alive;
    }
}

/// Get a cell. Coordinates outside the region are dead.
#[inline]
pub fn field_get(field: &Field, coord: &[i32]) -> bool {
    try_index_of(&field.region, coord).map_or(false, |idx| field.cells[idx])
}

/// Like `field_get`, but rejects coordinates with the wrong number of axes
/// instead of reading them as dead.
pub fn field_get_checked(field: &Field, coord: &[i32]) -> Result<bool> {
    if coord.len() != field.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: field.dimensions(),
            found: coord.len(),
        });
    }
    Ok(field_get(field, coord))
}

/// Number of alive cells.
pub fn alive_count(field: &Field) -> usize {
    field.cells.iter().filter(|&&alive| alive).count()
}

/// Coordinates of every alive cell, in index order.
pub fn alive_coords(field: &Field) -> Vec<Vec<i32>> {
    field
        .cells
        .iter()
        .enumerate()
        .filter(|&(_, &alive)| alive)
        .map(|(idx, _)| coord_of(&field.region, idx))
        .collect()
}
