//! FFI interface for incremental stepping.

use std::os::raw::c_char;

use super::str_arg;
use crate::automaton::{alive_count, Field, Rule, StepController};

/// Create a new StepController that takes ownership of `field`.
///
/// `rule` may be null for B3/S23. A thread count of 0 means 1.
///
/// # Safety
/// - `field` must be a valid pointer returned by `ha_create_field()`; it is consumed
///   and must not be used or destroyed afterwards, even when this call fails
/// - `rule` must be a valid NUL-terminated string, or null
///
/// # Returns
/// A pointer to the StepController, or null if `field` is null or `rule` does not parse.
#[no_mangle]
pub unsafe extern "C" fn ha_create_step_controller(
    field: *mut Field,
    rule: *const c_char,
    num_threads: u8,
) -> *mut StepController {
    if field.is_null() {
        return std::ptr::null_mut();
    }
    let field = *Box::from_raw(field);

    let rule = if rule.is_null() {
        Rule::default()
    } else {
        match str_arg(rule, "rule").map(str::parse::<Rule>) {
            Some(Ok(rule)) => rule,
            Some(Err(err)) => {
                log::warn!("ha_create_step_controller: {}", err);
                return std::ptr::null_mut();
            }
            None => return std::ptr::null_mut(),
        }
    };

    Box::into_raw(Box::new(StepController::new(field, rule, num_threads)))
}

/// Destroy a StepController and free its memory.
///
/// # Safety
/// - `ctrl` must be a valid pointer returned by `ha_create_step_controller()`, or null
#[no_mangle]
pub unsafe extern "C" fn ha_destroy_step_controller(ctrl: *mut StepController) {
    if !ctrl.is_null() {
        drop(Box::from_raw(ctrl));
    }
}

/// Get the current generation number of the inner field.
///
/// # Safety
/// - `ctrl` must be a valid StepController pointer, or null
#[no_mangle]
pub unsafe extern "C" fn ha_sc_get_generation(ctrl: *const StepController) -> u64 {
    if ctrl.is_null() {
        return 0;
    }
    (*ctrl).field.generation
}

/// Count alive cells of the inner field.
///
/// # Safety
/// - `ctrl` must be a valid StepController pointer, or null
#[no_mangle]
pub unsafe extern "C" fn ha_sc_alive_count(ctrl: *const StepController) -> u64 {
    if ctrl.is_null() {
        return 0;
    }
    alive_count(&(*ctrl).field) as u64
}

/// Begin a new incremental step.
///
/// # Safety
/// - `ctrl` must be a valid StepController pointer, or null
///
/// # Returns
/// 0 on success, 1 if a step is already in progress or the region overflows,
/// -1 if ctrl is null.
#[no_mangle]
pub unsafe extern "C" fn ha_sc_begin_step(ctrl: *mut StepController) -> i32 {
    if ctrl.is_null() {
        return -1;
    }
    match (*ctrl).begin_step() {
        Ok(()) => 0,
        Err(err) => {
            log::warn!("ha_sc_begin_step: {}", err);
            1
        }
    }
}

/// Do bounded work within the given time budget (microseconds).
///
/// # Safety
/// - `ctrl` must be a valid StepController pointer, or null
///
/// # Returns
/// 1 if the step completed during this tick, 0 if more work remains, -1 if no step
/// is active or ctrl is null.
#[no_mangle]
pub unsafe extern "C" fn ha_sc_tick(ctrl: *mut StepController, budget_us: u64) -> i32 {
    if ctrl.is_null() {
        return -1;
    }
    let ctrl = &mut *ctrl;
    if !ctrl.is_stepping() {
        return -1;
    }
    if ctrl.tick(budget_us) {
        1
    } else {
        0
    }
}

/// Query whether a step is currently in progress.
///
/// # Safety
/// - `ctrl` must be a valid StepController pointer, or null
///
/// # Returns
/// 1 if stepping, 0 if idle, -1 if null pointer.
#[no_mangle]
pub unsafe extern "C" fn ha_sc_is_stepping(ctrl: *const StepController) -> i32 {
    if ctrl.is_null() {
        return -1;
    }
    if (*ctrl).is_stepping() {
        1
    } else {
        0
    }
}
