//! Error type shared by the automaton and FFI layers.

use thiserror::Error;

/// All kinds of errors in this crate.
///
/// Lookups outside the materialized region are not errors; they read as dead cells.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Seeding a 2D pattern needs at least two axes.
    #[error("a lattice seeded from a 2D pattern needs at least 2 dimensions, got {dimensions}")]
    TooFewDimensions { dimensions: usize },

    /// The seed pattern has no rows or no columns.
    #[error("seed pattern is empty")]
    EmptySeed,

    /// A rule string could not be parsed.
    #[error("invalid rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: String },

    /// A coordinate or box has the wrong number of axes.
    #[error("expected {expected} axes, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The number of cells in a region does not fit in `usize`.
    #[error("region is too large to materialize")]
    RegionTooLarge,

    /// An incremental step is already running.
    #[error("a step is already in progress")]
    StepInProgress,
}

pub type Result<T> = std::result::Result<T, Error>;
