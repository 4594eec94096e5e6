//! Hyper Automata - N-dimensional cellular automata library
//!
//! A lattice of boolean cells whose number of axes is chosen at runtime and whose
//! materialized region grows by one cell on every side each generation. The Rust
//! API lives in [`automaton`]; [`ffi`] exposes a C ABI over it.

pub mod automaton;
pub mod error;
pub mod ffi;

pub use automaton::{Field, Region, Rule, StepController};
pub use error::{Error, Result};
