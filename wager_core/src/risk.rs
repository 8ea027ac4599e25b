//! Qualitative risk classification of a sized wager.
//!
//! A pure mapping from sizing and prediction inputs to a tier, a list of
//! contributing factors, and a recommendation. No dependency on the
//! simulation itself, so it is testable in isolation.

use crate::types::{ConfidenceBand, RiskAssessment, RiskLevel};

/// Kelly fraction above which a bet is tiered High
const HIGH_KELLY_THRESHOLD: f64 = 0.25;
/// Kelly fraction above which a bet is tiered Medium
const MEDIUM_KELLY_THRESHOLD: f64 = 0.10;
/// Odds above this imply a long shot worth flagging
const HIGH_ODDS_THRESHOLD: f64 = 3.0;
/// Prediction bands whose floor is below this are flagged as low confidence
const LOW_CONFIDENCE_FLOOR: f64 = 0.6;

/// Classify a wager from its pre-clamp Kelly fraction, odds, expected value
/// and the prediction source's confidence band.
///
/// The tier is computed from the clamped fraction; the raw value is taken so
/// the negative-EV factor can still fire.
pub fn classify_risk(
    kelly_fraction_raw: f64,
    odds: f64,
    _expected_value: f64,
    confidence_band: &ConfidenceBand,
) -> RiskAssessment {
    let kelly = kelly_fraction_raw.max(0.0);

    let level = if kelly > HIGH_KELLY_THRESHOLD {
        RiskLevel::High
    } else if kelly > MEDIUM_KELLY_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    // Each factor is evaluated independently; order is fixed
    let mut factors = Vec::new();
    if odds > HIGH_ODDS_THRESHOLD {
        factors.push("high odds indicate lower probability".to_string());
    }
    if kelly_fraction_raw < 0.0 {
        factors.push("negative expected value".to_string());
    }
    if confidence_band.lower < LOW_CONFIDENCE_FLOOR {
        factors.push("low prediction confidence".to_string());
    }

    let recommendation = if kelly_fraction_raw <= 0.0 {
        "avoid this bet".to_string()
    } else if level == RiskLevel::High {
        "reduce stake size".to_string()
    } else {
        "proceed with caution".to_string()
    };

    RiskAssessment {
        level,
        factors,
        recommendation,
    }
}
