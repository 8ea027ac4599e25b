//! Core data types for bet evaluation and arbitrage staking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate wager to evaluate.
///
/// Immutable once constructed; build a new scenario instead of mutating one
/// mid-simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationScenario {
    /// Stable identifier used to key batch results (last-run-wins)
    pub id: String,
    /// Currency amount staked per trial
    pub stake: f64,
    /// Decimal odds (e.g. 2.2 = 2.2x gross return)
    pub odds: f64,
    /// Event selector passed through to the prediction source
    pub event_id: String,
    /// Player selector passed through to the prediction source
    pub player: String,
    /// Market selector passed through to the prediction source
    pub market: String,
    /// Number of Monte Carlo trials
    pub iterations: u64,
    /// Optional caller-side grouping tag
    pub risk_level: Option<RiskLevel>,
}

/// Default trial count when the caller does not specify one
pub const DEFAULT_ITERATIONS: u64 = 1_000;

impl SimulationScenario {
    pub fn new(
        stake: f64,
        odds: f64,
        event_id: impl Into<String>,
        player: impl Into<String>,
        market: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            stake,
            odds,
            event_id: event_id.into(),
            player: player.into(),
            market: market.into(),
            iterations: DEFAULT_ITERATIONS,
            risk_level: None,
        }
    }

    /// Replace the generated id with a caller-supplied one
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_risk_level(mut self, level: RiskLevel) -> Self {
        self.risk_level = Some(level);
        self
    }

    /// Net odds: profit per unit stake on a win
    pub fn net_odds(&self) -> f64 {
        self.odds - 1.0
    }

    /// Break-even win probability implied by the odds
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.odds
    }
}

/// Point estimate plus confidence band from the prediction source.
///
/// Distinct from [`ConfidenceInterval`], which bounds the simulated mean
/// outcome rather than the win probability.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PredictionInput {
    pub win_probability: f64,
    pub confidence_band: ConfidenceBand,
}

impl PredictionInput {
    pub fn new(win_probability: f64, lower: f64, upper: f64) -> Self {
        Self {
            win_probability,
            confidence_band: ConfidenceBand { lower, upper },
        }
    }
}

/// Band of plausible win probabilities, `lower <= upper`, both in (0, 1)
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: f64,
    pub upper: f64,
}

/// Qualitative risk tier, ordered low to high
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Tier plus the factors and recommendation that justify it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Independently evaluated qualitative factors, in fixed order
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// Raw trial tallies and dispersion statistics
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimulationBreakdown {
    pub wins: u64,
    pub losses: u64,
    pub total_payout: f64,
    pub total_loss: f64,
    pub variance: f64,
    pub sharpe_ratio: f64,
}

/// Confidence interval on the mean signed outcome per trial
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level in percent (95.0 under the normal approximation)
    pub interval: f64,
}

/// Output of one simulation run, bound 1:1 to the scenario that produced it.
///
/// Never mutated after construction; a later run for the same scenario id
/// supersedes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario_id: String,
    pub win_probability: f64,
    pub expected_payout: f64,
    pub expected_loss: f64,
    /// Signed currency EV per trial
    pub expected_value: f64,
    /// Clamped Kelly fraction of bankroll, >= 0
    pub kelly_fraction: f64,
    /// Expected return on stake, in percent
    pub roi: f64,
    pub risk: RiskAssessment,
    pub breakdown: SimulationBreakdown,
    pub confidence: ConfidenceInterval,
    pub simulated_at: DateTime<Utc>,
}

/// One leg of a two-sided arbitrage
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArbitrageSide {
    pub selection: String,
    pub bookmaker: String,
    pub odds: f64,
    /// Computed by the allocator, >= 0
    pub stake: f64,
    /// stake * odds
    pub payout: f64,
}

impl ArbitrageSide {
    pub fn new(
        selection: impl Into<String>,
        bookmaker: impl Into<String>,
        odds: f64,
        stake: f64,
    ) -> Self {
        Self {
            selection: selection.into(),
            bookmaker: bookmaker.into(),
            odds,
            stake,
            payout: stake * odds,
        }
    }
}

/// Lifecycle of a tracked arbitrage opportunity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArbitrageStatus {
    Active,
    Executing,
    Completed,
    Expired,
    Failed,
}

/// A two-sided stake split with a guaranteed payout.
///
/// While `status` is `Active` the two payouts are equal within rounding
/// tolerance, by construction of the allocator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub side_a: ArbitrageSide,
    pub side_b: ArbitrageSide,
    /// Guaranteed profit as a fraction of total stake
    pub profit_margin: f64,
    pub total_stake: f64,
    pub guaranteed_profit: f64,
    /// Coincides with profit_margin: total stake is the capital at risk
    pub roi: f64,
    pub risk_level: RiskLevel,
    /// Confidence that the quoted odds are simultaneously fillable
    pub confidence: f64,
    pub status: ArbitrageStatus,
    pub description: String,
    pub detected_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// Transition the lifecycle status, refreshing `updated_at`
    pub fn set_status(&mut self, status: ArbitrageStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Ad-hoc stake split for a user-supplied total stake; not persisted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArbitrageCalculation {
    /// Stake on the side with odds A
    pub stake_a: f64,
    /// Stake on the side with odds B
    pub stake_b: f64,
    /// Equalized payout of either side
    pub payout: f64,
    pub profit: f64,
    pub margin: f64,
    /// Coincides with margin in this domain
    pub roi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_defaults() {
        let scenario = SimulationScenario::new(100.0, 2.2, "evt-1", "J. Smith", "points_over");
        assert_eq!(scenario.iterations, DEFAULT_ITERATIONS);
        assert!(scenario.risk_level.is_none());
        assert!(!scenario.id.is_empty());
    }

    #[test]
    fn test_scenario_builders() {
        let scenario = SimulationScenario::new(50.0, 1.8, "evt-2", "A. Jones", "assists_over")
            .with_id("my-id")
            .with_iterations(10_000)
            .with_risk_level(RiskLevel::Medium);
        assert_eq!(scenario.id, "my-id");
        assert_eq!(scenario.iterations, 10_000);
        assert_eq!(scenario.risk_level, Some(RiskLevel::Medium));
    }

    #[test]
    fn test_net_odds_and_implied_probability() {
        let scenario = SimulationScenario::new(100.0, 2.5, "evt", "p", "m");
        assert!((scenario.net_odds() - 1.5).abs() < 1e-12);
        assert!((scenario.implied_probability() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_arbitrage_side_payout() {
        let side = ArbitrageSide::new("Team A", "BookX", 2.15, 465.12);
        assert!((side.payout - 465.12 * 2.15).abs() < 1e-9);
    }

    #[test]
    fn test_risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
        let json = serde_json::to_string(&ArbitrageStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_scenario_round_trips_through_json() {
        let scenario = SimulationScenario::new(100.0, 2.2, "evt-1", "J. Smith", "points_over");
        let json = serde_json::to_string(&scenario).unwrap();
        let back: SimulationScenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, scenario.id);
        assert_eq!(back.iterations, scenario.iterations);
    }
}
