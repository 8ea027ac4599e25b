//! Monte Carlo simulation of a single wager scenario.
//!
//! Each trial is an independent Bernoulli draw against the predicted win
//! probability. A win pays `stake * (odds - 1)`, a loss forfeits the stake;
//! the signed per-trial outcomes feed the dispersion statistics and the 95%
//! interval on the mean outcome.
//!
//! Trials run sequentially against the injected random source so a fixed
//! seed reproduces the result bit for bit. Scenario-level parallelism lives
//! in the batch layer, which derives an independent seed per scenario.

use chrono::Utc;
use tracing::debug;

use crate::error::{
    validate_iterations, validate_odds, validate_probability, validate_stake, EngineError,
};
use crate::kelly::{kelly_fraction_raw, kelly_fraction};
use crate::random::{RandomSource, ThreadRandom};
use crate::risk::classify_risk;
use crate::stats;
use crate::types::{
    ConfidenceInterval, PredictionInput, SimulationBreakdown, SimulationResult,
    SimulationScenario,
};

/// Run one Monte Carlo simulation for `scenario` under `prediction`.
///
/// Inputs are validated before any trial runs; a rejected input never yields
/// a partial result.
pub fn simulate(
    scenario: &SimulationScenario,
    prediction: &PredictionInput,
    mut rng: impl RandomSource,
) -> Result<SimulationResult, EngineError> {
    validate_inputs(scenario, prediction)?;

    let p = prediction.win_probability;
    let stake = scenario.stake;
    let win_payout = stake * scenario.net_odds();
    let iterations = scenario.iterations;

    let mut wins = 0u64;
    let mut total_payout = 0.0;
    let mut total_loss = 0.0;
    let mut outcomes = Vec::with_capacity(iterations as usize);

    for _ in 0..iterations {
        if rng.next_f64() <= p {
            wins += 1;
            total_payout += win_payout;
            outcomes.push(win_payout);
        } else {
            total_loss += stake;
            outcomes.push(-stake);
        }
    }
    let losses = iterations - wins;

    let n = iterations as f64;
    let expected_payout = total_payout / n;
    let expected_loss = total_loss / n;
    let expected_value = expected_payout - expected_loss;
    let roi = expected_value / stake * 100.0;

    let mean = stats::mean(&outcomes);
    let variance = stats::variance(&outcomes, mean);
    let std_dev = variance.sqrt();
    let sharpe = stats::sharpe_ratio(mean, std_dev);
    let half_width = stats::confidence_half_width(std_dev, iterations);

    let kelly_raw = kelly_fraction_raw(p, scenario.odds);
    let risk = classify_risk(kelly_raw, scenario.odds, expected_value, &prediction.confidence_band);

    debug!(
        scenario_id = %scenario.id,
        iterations,
        wins,
        losses,
        expected_value,
        "simulation complete"
    );

    Ok(SimulationResult {
        scenario_id: scenario.id.clone(),
        win_probability: p,
        expected_payout,
        expected_loss,
        expected_value,
        kelly_fraction: kelly_fraction(p, scenario.odds),
        roi,
        risk,
        breakdown: SimulationBreakdown {
            wins,
            losses,
            total_payout,
            total_loss,
            variance,
            sharpe_ratio: sharpe,
        },
        confidence: ConfidenceInterval {
            lower: mean - half_width,
            upper: mean + half_width,
            interval: stats::CONFIDENCE_LEVEL_PCT,
        },
        simulated_at: Utc::now(),
    })
}

/// [`simulate`] with OS-seeded randomness
pub fn simulate_default(
    scenario: &SimulationScenario,
    prediction: &PredictionInput,
) -> Result<SimulationResult, EngineError> {
    simulate(scenario, prediction, ThreadRandom)
}

fn validate_inputs(
    scenario: &SimulationScenario,
    prediction: &PredictionInput,
) -> Result<(), EngineError> {
    validate_probability(prediction.win_probability, "win probability")?;
    validate_odds(scenario.odds, "odds")?;
    validate_stake(scenario.stake, "stake")?;
    validate_iterations(scenario.iterations)?;

    let band = &prediction.confidence_band;
    if band.lower > band.upper {
        return Err(EngineError::Validation(format!(
            "confidence band lower {} exceeds upper {}",
            band.lower, band.upper
        )));
    }
    Ok(())
}
