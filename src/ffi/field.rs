//! Cell access and stepping.

use std::os::raw::c_char;

use super::{coord_arg, str_arg};
use crate::automaton::{
    alive_count, field_get_checked, field_set, run_generations, step_field, Field, Rule,
};

/// Gets the state of a cell (0 = dead, 1 = alive).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
/// - `coord` must point to `len` readable `i32`s, or be null
///
/// # Returns
/// 1 if alive; 0 if dead, outside the region, null, or `len` is not the field's
/// dimension count.
#[no_mangle]
pub unsafe extern "C" fn ha_field_get(ptr: *const Field, coord: *const i32, len: usize) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    let coord = match coord_arg(coord, len) {
        Some(coord) => coord,
        None => return 0,
    };

    match field_get_checked(&*ptr, coord) {
        Ok(alive) => alive as u8,
        Err(err) => {
            log::warn!("ha_field_get: {}", err);
            0
        }
    }
}

/// Sets a cell to alive (non-zero) or dead (0).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
/// - `coord` must point to `len` readable `i32`s, or be null
///
/// Coordinates outside the region are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn ha_field_set(ptr: *mut Field, coord: *const i32, len: usize, alive: u8) {
    if ptr.is_null() {
        return;
    }
    if let Some(coord) = coord_arg(coord, len) {
        field_set(&mut *ptr, coord, alive != 0);
    }
}

/// Counts alive cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
///
/// # Returns
/// The number of alive cells, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ha_field_alive_count(ptr: *const Field) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    alive_count(&*ptr) as u64
}

/// Replaces the field with its next generation under `rule`.
unsafe fn replace_with_step(ptr: *mut Field, rule: &Rule) -> i32 {
    match step_field(&*ptr, rule) {
        Ok(next) => {
            *ptr = next;
            0
        }
        Err(err) => {
            log::warn!("step failed: {}", err);
            1
        }
    }
}

/// Advances the field by one generation using the B3/S23 rule.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
#[no_mangle]
pub unsafe extern "C" fn ha_field_step(ptr: *mut Field) {
    if ptr.is_null() {
        return;
    }
    replace_with_step(ptr, &Rule::default());
}

/// Advances the field by one generation using a rule string such as `B36/S23`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
/// - `rule` must be a valid NUL-terminated string, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer, unparseable rule, or region overflow).
#[no_mangle]
pub unsafe extern "C" fn ha_field_step_rule(ptr: *mut Field, rule: *const c_char) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    let rule = match str_arg(rule, "rule").map(str::parse::<Rule>) {
        Some(Ok(rule)) => rule,
        Some(Err(err)) => {
            log::warn!("ha_field_step_rule: {}", err);
            return 1;
        }
        None => return 1,
    };
    replace_with_step(ptr, &rule)
}

/// Advances the field by `generations` generations using the B3/S23 rule.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Field, or null
///
/// # Returns
/// 0 on success, 1 on failure. On failure the field is left unchanged.
#[no_mangle]
pub unsafe extern "C" fn ha_field_run(ptr: *mut Field, generations: u64) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    match run_generations((*ptr).clone(), &Rule::default(), generations) {
        Ok(next) => {
            *ptr = next;
            0
        }
        Err(err) => {
            log::warn!("ha_field_run: {}", err);
            1
        }
    }
}
