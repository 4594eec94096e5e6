//! Field creation, destruction, and generation queries.

use std::os::raw::c_char;

use super::str_arg;
use crate::automaton::{seed_field_from_str, Field};

/// Creates a field from a 2D seed pattern embedded in `dimensions` axes.
///
/// The pattern has one row per line, `#` for alive cells and anything else dead.
///
/// # Returns
/// A pointer to a new Field, or null if the seed or dimension count is rejected.
///
/// # Safety
/// - `seed` must be null or a valid NUL-terminated string
/// - The returned pointer must eventually be freed with `ha_destroy_field()`.
#[no_mangle]
pub unsafe extern "C" fn ha_create_field(seed: *const c_char, dimensions: u32) -> *mut Field {
    let seed = match str_arg(seed, "seed") {
        Some(seed) => seed,
        None => return std::ptr::null_mut(),
    };

    match seed_field_from_str(seed, dimensions as usize) {
        Ok(field) => Box::into_raw(Box::new(field)),
        Err(err) => {
            log::warn!("ha_create_field: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// Destroys a field and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ha_create_field()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ha_destroy_field(ptr: *mut Field) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter from a field.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ha_field_get_generation(ptr: *const Field) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation
}

/// Gets the number of axes of a field.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
///
/// # Returns
/// The dimension count, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ha_field_dimensions(ptr: *const Field) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).dimensions() as u32
}
