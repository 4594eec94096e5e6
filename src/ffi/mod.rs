//! C FFI layer.
//!
//! This module exports C ABI functions. All functions are marked with `#[no_mangle]`
//! and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions. Rejected calls
//! are logged at warn level, since C callers only see a sentinel return value.

use std::ffi::CStr;
use std::os::raw::c_char;

pub mod field;
pub mod incremental;
pub mod lifecycle;
pub mod region;

pub use field::{
    ha_field_alive_count, ha_field_get, ha_field_run, ha_field_set, ha_field_step,
    ha_field_step_rule,
};
pub use incremental::{
    ha_create_step_controller, ha_destroy_step_controller, ha_sc_alive_count, ha_sc_begin_step,
    ha_sc_get_generation, ha_sc_is_stepping, ha_sc_tick,
};
pub use lifecycle::{ha_create_field, ha_destroy_field, ha_field_dimensions, ha_field_get_generation};
pub use region::{ha_extract_region, ha_import_region};

/// Borrow a NUL-terminated UTF-8 string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn str_arg<'a>(ptr: *const c_char, what: &str) -> Option<&'a str> {
    if ptr.is_null() {
        log::warn!("{} is null", what);
        return None;
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Some(s),
        Err(err) => {
            log::warn!("{} is not valid UTF-8: {}", what, err);
            None
        }
    }
}

/// Borrow `len` coordinates.
///
/// # Safety
/// `ptr` must be null or point to at least `len` readable `i32`s.
unsafe fn coord_arg<'a>(ptr: *const i32, len: usize) -> Option<&'a [i32]> {
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(ptr, len))
}
