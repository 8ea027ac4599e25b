//! Engine error types and input validation.
//!
//! Validation always runs before any computation: a rejected input never
//! produces a partial result. Numerical edge cases (zero variance, zero net
//! odds) are defined conventions handled inline, not errors.

use thiserror::Error;

/// Errors surfaced by the evaluation engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input rejected before computation
    #[error("validation error: {0}")]
    Validation(String),

    /// The prediction source could not resolve an estimate for a scenario
    #[error("prediction unavailable for scenario {scenario_id}: {reason}")]
    PredictionUnavailable { scenario_id: String, reason: String },
}

/// Probability must lie strictly inside (0, 1)
pub fn validate_probability(prob: f64, what: &str) -> Result<(), EngineError> {
    if !prob.is_finite() || prob <= 0.0 || prob >= 1.0 {
        return Err(EngineError::Validation(format!(
            "{} must be strictly between 0 and 1, got {}",
            what, prob
        )));
    }
    Ok(())
}

/// Decimal odds must exceed 1.0 (a payout above stake must exist)
pub fn validate_odds(odds: f64, what: &str) -> Result<(), EngineError> {
    if !odds.is_finite() || odds <= 1.0 {
        return Err(EngineError::Validation(format!(
            "{} must be greater than 1.0, got {}",
            what, odds
        )));
    }
    Ok(())
}

/// Stake amounts must be positive
pub fn validate_stake(stake: f64, what: &str) -> Result<(), EngineError> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(EngineError::Validation(format!(
            "{} must be positive, got {}",
            what, stake
        )));
    }
    Ok(())
}

/// Trial counts must be at least 1
pub fn validate_iterations(iterations: u64) -> Result<(), EngineError> {
    if iterations == 0 {
        return Err(EngineError::Validation(
            "iterations must be at least 1, got 0".to_string(),
        ));
    }
    Ok(())
}
