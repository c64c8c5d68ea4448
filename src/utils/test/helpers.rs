//! Test helper functions
//!
//! This module provides utilities for testing and benchmarking.

use std::time::{Duration, Instant};

/// Timed execution of a function
pub fn timed_execution<F, T>(func: F) -> (Duration, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = func();
    (start.elapsed(), result)
}

/// Relative closeness check for floating-point results
///
/// Two `NaN` values are considered close, since degenerate cells are
/// expected to stay `NaN`.
#[must_use]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}
