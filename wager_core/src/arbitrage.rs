//! Two-sided arbitrage stake allocation.
//!
//! Splitting a total stake across opposing odds in inverse-odds proportion
//! equalizes the payout of both legs. When the combined implied probability
//! `1/oddsA + 1/oddsB` is below 1.0, that equalized payout exceeds the total
//! stake and the profit is guaranteed regardless of outcome.

use chrono::Utc;
use tracing::debug;

use crate::error::{validate_odds, validate_stake, EngineError};
use crate::types::{
    ArbitrageCalculation, ArbitrageOpportunity, ArbitrageSide, ArbitrageStatus, RiskLevel,
};

/// Profit margin above which a tracked opportunity is considered low risk
const LOW_RISK_MARGIN: f64 = 0.03;
/// Profit margin above which a tracked opportunity is considered medium risk
const MEDIUM_RISK_MARGIN: f64 = 0.01;

/// Sum of implied probabilities across both sides; below 1.0 means the split
/// locks in a risk-free profit.
pub fn combined_implied_probability(odds_a: f64, odds_b: f64) -> f64 {
    1.0 / odds_a + 1.0 / odds_b
}

/// Split `total_stake` across two opposing odds so both payouts are equal.
///
/// Satisfies `stake_a * odds_a == stake_b * odds_b` and
/// `stake_a + stake_b == total_stake`. Margin and ROI coincide: the total
/// stake is the capital at risk.
pub fn allocate_arbitrage(
    total_stake: f64,
    odds_a: f64,
    odds_b: f64,
) -> Result<ArbitrageCalculation, EngineError> {
    validate_stake(total_stake, "total stake")?;
    validate_odds(odds_a, "odds A")?;
    validate_odds(odds_b, "odds B")?;

    let w_a = 1.0 / odds_a;
    let w_b = 1.0 / odds_b;
    let total_weight = w_a + w_b;
    // Unreachable when both odds exceed 1, but guard the division anyway
    if total_weight <= 0.0 {
        return Err(EngineError::Validation(format!(
            "degenerate implied probabilities: {} + {}",
            w_a, w_b
        )));
    }

    let stake_a = total_stake * w_a / total_weight;
    let stake_b = total_stake - stake_a;
    let payout = stake_a * odds_a;
    let profit = payout - total_stake;
    let margin = profit / total_stake;

    debug!(
        odds_a,
        odds_b, stake_a, stake_b, margin, "arbitrage allocation computed"
    );

    Ok(ArbitrageCalculation {
        stake_a,
        stake_b,
        payout,
        profit,
        margin,
        roi: margin,
    })
}

/// Assemble a tracked [`ArbitrageOpportunity`] from an allocation across two
/// named bookmaker sides.
///
/// The opportunity starts `Active` with equal payouts by construction; the
/// risk tier derives from the guaranteed margin.
#[allow(clippy::too_many_arguments)]
pub fn build_opportunity(
    total_stake: f64,
    selection_a: impl Into<String>,
    bookmaker_a: impl Into<String>,
    odds_a: f64,
    selection_b: impl Into<String>,
    bookmaker_b: impl Into<String>,
    odds_b: f64,
    confidence: f64,
) -> Result<ArbitrageOpportunity, EngineError> {
    let calc = allocate_arbitrage(total_stake, odds_a, odds_b)?;

    let side_a = ArbitrageSide::new(selection_a, bookmaker_a, odds_a, calc.stake_a);
    let side_b = ArbitrageSide::new(selection_b, bookmaker_b, odds_b, calc.stake_b);

    let risk_level = if calc.margin >= LOW_RISK_MARGIN {
        RiskLevel::Low
    } else if calc.margin >= MEDIUM_RISK_MARGIN {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    let description = format!(
        "Back {} @ {:.2} ({}) for {:.2} + {} @ {:.2} ({}) for {:.2} = {:.2} payout either way (margin {:.2}%)",
        side_a.selection,
        side_a.odds,
        side_a.bookmaker,
        side_a.stake,
        side_b.selection,
        side_b.odds,
        side_b.bookmaker,
        side_b.stake,
        calc.payout,
        calc.margin * 100.0
    );

    let now = Utc::now();
    Ok(ArbitrageOpportunity {
        side_a,
        side_b,
        profit_margin: calc.margin,
        total_stake,
        guaranteed_profit: calc.profit,
        roi: calc.roi,
        risk_level,
        confidence,
        status: ArbitrageStatus::Active,
        description,
        detected_at: now,
        updated_at: now,
    })
}
