//! Core automaton logic.
//!
//! This module contains the region and coordinate model, the neighborhood walk,
//! the transition rule, and generation stepping. The FFI layer in `ffi/` calls
//! these functions.

pub mod bounds;
pub mod field;
pub mod grid;
pub mod incremental;
pub mod neighbors;
pub mod region;
pub mod rule;
pub mod stepping;

pub use bounds::{AxisBound, Region};
pub use field::{
    alive_coords, alive_count, create_field, field_get, field_get_checked, field_set, seed_field,
    seed_field_from_str, Field,
};
pub use grid::{coord_of, in_bounds, index_of, try_index_of};
pub use incremental::StepController;
pub use neighbors::{count_neighbors, neighbors, Neighbors};
pub use region::{extract_region, import_region};
pub use rule::{LifeLikeCounts, Rule};
pub use stepping::{run_generations, run_generations_parallel, step_field, step_field_parallel};
