//! Kelly criterion stake sizing.
//!
//! Kelly formula: f* = (b*p - q) / b
//! where:
//!     b = odds - 1 (net odds)
//!     p = probability of winning
//!     q = 1 - p
//!
//! The public [`kelly_fraction`] clamps at zero: a negative Kelly value
//! means no edge, reported as a zero stake recommendation rather than a
//! negative bet size.

/// Raw Kelly fraction, unclamped; negative when the bet has no edge.
///
/// The risk classifier consumes this pre-clamp value so it can flag negative
/// expected value. Zero net odds short-circuit to 0.
pub fn kelly_fraction_raw(win_probability: f64, odds: f64) -> f64 {
    let b = odds - 1.0;
    if b <= 0.0 {
        return 0.0;
    }
    let p = win_probability;
    let q = 1.0 - p;
    (b * p - q) / b
}

/// Recommended fraction of bankroll to stake, clamped to `>= 0`
pub fn kelly_fraction(win_probability: f64, odds: f64) -> f64 {
    kelly_fraction_raw(win_probability, odds).max(0.0)
}

/// Fractional-Kelly currency stake with a bankroll-percentage cap.
///
/// `multiplier` scales the full Kelly fraction (0.25 = quarter Kelly);
/// `max_stake_pct` caps the stake as a fraction of bankroll.
pub fn recommended_stake(
    win_probability: f64,
    odds: f64,
    bankroll: f64,
    multiplier: f64,
    max_stake_pct: f64,
) -> f64 {
    let kelly = kelly_fraction(win_probability, odds);
    if kelly <= 0.0 || bankroll <= 0.0 {
        return 0.0;
    }
    let fraction = (kelly * multiplier).min(max_stake_pct);
    bankroll * fraction
}
