//! Generation stepping over a growing region.
//!
//! Each step grows the region by one cell on every side, then computes every cell
//! of the grown region from the previous field, which stays read-only throughout.
//! Every target index depends only on the old field, so the work splits freely
//! across threads.

use rayon::prelude::*;

use super::bounds::Region;
use super::field::{alive_count, Field};
use super::grid::{coord_of_into, try_index_of};
use super::neighbors::count_live_neighbors;
use super::rule::Rule;
use crate::error::Result;

/// Per-thread buffers for computing cells without allocating per index.
pub(crate) struct Scratch {
    coord: Vec<i32>,
    neighbor: Vec<i32>,
}

impl Scratch {
    pub(crate) fn new(dimensions: usize) -> Self {
        Scratch {
            coord: vec![0; dimensions],
            neighbor: vec![0; dimensions],
        }
    }
}

/// Next state of the cell at `index` in `next_region`, read from `old`.
pub(crate) fn next_cell(
    old: &Field,
    next_region: &Region,
    rule: &Rule,
    index: usize,
    scratch: &mut Scratch,
) -> bool {
    coord_of_into(next_region, index, &mut scratch.coord);

    let was_alive = try_index_of(&old.region, &scratch.coord).map_or(false, |i| old.cells[i]);

    let live_neighbors =
        count_live_neighbors(&old.region, &old.cells, &scratch.coord, &mut scratch.neighbor);

    rule.next_state(was_alive, live_neighbors)
}

/// Step the field forward by one generation.
///
/// Returns the new field; `field` itself is left untouched.
pub fn step_field(field: &Field, rule: &Rule) -> Result<Field> {
    let region = field.region.grow()?;
    let size = region.size();

    let mut scratch = Scratch::new(region.dimensions());
    let cells: Vec<bool> = (0..size)
        .map(|index| next_cell(field, &region, rule, index, &mut scratch))
        .collect();

    let next = Field {
        region,
        cells,
        generation: field.generation + 1,
    };
    log_generation(&next);
    Ok(next)
}

/// Same as `step_field`, but computes cells on the current rayon pool.
pub fn step_field_parallel(field: &Field, rule: &Rule) -> Result<Field> {
    let region = field.region.grow()?;
    let size = region.size();
    let dimensions = region.dimensions();

    let cells: Vec<bool> = (0..size)
        .into_par_iter()
        .map_init(
            || Scratch::new(dimensions),
            |scratch, index| next_cell(field, &region, rule, index, scratch),
        )
        .collect();

    let next = Field {
        region,
        cells,
        generation: field.generation + 1,
    };
    log_generation(&next);
    Ok(next)
}

/// Run `generations` steps from `field`.
pub fn run_generations(field: Field, rule: &Rule, generations: u64) -> Result<Field> {
    let mut current = field;
    for _ in 0..generations {
        current = step_field(&current, rule)?;
    }
    Ok(current)
}

/// Same as `run_generations`, stepping with `step_field_parallel`.
pub fn run_generations_parallel(field: Field, rule: &Rule, generations: u64) -> Result<Field> {
    let mut current = field;
    for _ in 0..generations {
        current = step_field_parallel(&current, rule)?;
    }
    Ok(current)
}

fn log_generation(field: &Field) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "generation {}: {} cells, {} alive",
            field.generation,
            field.cells.len(),
            alive_count(field)
        );
    }
}
