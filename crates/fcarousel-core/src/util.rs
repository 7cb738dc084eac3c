#![forbid(unsafe_code)]

//! Small numeric helpers shared by every carousel module.

/// Modulo with a result carrying the sign of the divisor.
///
/// `modulo(-1.0, 5.0) == 4.0`. A zero divisor yields `0.0` instead of NaN so
/// an empty track never poisons slider positions.
#[inline]
#[must_use]
pub fn modulo(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    ((a % b) + b) % b
}

/// Integer modulo with a non-negative result. `len` must be non-zero.
#[inline]
#[must_use]
pub fn modulo_index(index: i64, len: usize) -> usize {
    let len = len as i64;
    (((index % len) + len) % len) as usize
}

/// Clamp `index` into `[0, len - 1]`. `None` when `len == 0`.
#[inline]
#[must_use]
pub fn clamp_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.clamp(0, len as i64 - 1) as usize)
}

/// Round to a fixed number of steps per unit (`precision = 100.0` keeps two
/// decimals) and return the integer bucket.
#[inline]
#[must_use]
pub fn quantize(value: f64, precision: f64) -> i64 {
    (value * precision).round() as i64
}

/// Round to `decimals` places.
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
