//! encoder/convert.rs
//!
//! Physical units → 32-bit operands.
//!
//! Rules:
//! - Sleep (µs) and timestep (ns) truncate toward zero.
//! - Tick counts and probabilities round half away from zero (`f64::round`).
//! - Anything non-finite, negative or wider than 32 bits is an error, never
//!   a wrapped or saturated operand (probability excepted, see below).

use crate::constants::{NS_PER_SEC, PROBABILITY_ALWAYS, PROBABILITY_SCALE, US_PER_SEC};
use crate::types::{CommandError, Result};

#[inline]
fn to_word(what: &'static str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(CommandError::OperandOverflow { what, value });
    }
    Ok(value as u32)
}

/// Whole microseconds, truncated.
pub fn seconds_to_us(what: &'static str, seconds: f64) -> Result<u32> {
    to_word(what, (seconds * US_PER_SEC).trunc())
}

/// Whole nanoseconds, truncated.
pub fn seconds_to_ns(what: &'static str, seconds: f64) -> Result<u32> {
    to_word(what, (seconds * NS_PER_SEC).trunc())
}

/// Number of `timestep`-long ticks in `seconds`, rounded to nearest.
pub fn seconds_to_ticks(what: &'static str, seconds: f64, timestep: f64) -> Result<u32> {
    to_word(what, (seconds / timestep).round())
}

/// Fixed-point probability with 2^32 as one.
///
/// Exactly `1.0` maps to `0xFFFFFFFF`; values just below one that round up to
/// 2^32 are clamped to the same word.
pub fn probability_to_fixed(probability: f64) -> Result<u32> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(CommandError::InvalidValue { what: "probability", value: probability });
    }
    if probability == 1.0 {
        return Ok(PROBABILITY_ALWAYS);
    }
    let scaled = (probability * PROBABILITY_SCALE).round();
    Ok(scaled.min(PROBABILITY_ALWAYS as f64) as u32)
}

