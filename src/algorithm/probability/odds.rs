//! Odds ratio to probability conversion

use crate::error::{GeneratorError, Result};

/// Decimal digits kept on every emitted probability
pub const PROBABILITY_DIGITS: usize = 4;

/// Round to `digits` decimal places
///
/// Rounding goes through the decimal expansion of the exact binary value
/// rather than scaling by a power of ten.
#[must_use]
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Round to the precision used for module probabilities
#[must_use]
pub fn round_probability(value: f64) -> f64 {
    round_to(value, PROBABILITY_DIGITS)
}

/// Clamp a value into [0, 1]
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Convert an odds ratio to a probability: `odds / (1 + odds)`, rounded
pub fn odds_to_probability(odds: f64) -> Result<f64> {
    if !odds.is_finite() {
        return Err(GeneratorError::NonFiniteOdds { odds });
    }
    if odds < 0.0 {
        return Err(GeneratorError::NegativeOdds { odds });
    }
    Ok(round_probability(odds / (1.0 + odds)))
}
