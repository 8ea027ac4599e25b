//! Pluggable prediction sources.
//!
//! The engine never fabricates win probabilities: every simulation consumes
//! a [`PredictionInput`] resolved by a caller-supplied source. From the
//! engine's perspective resolution is synchronous and side-effect-free;
//! caching and retry policy belong to the implementation.

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::types::{PredictionInput, SimulationScenario};

/// Resolves a win-probability estimate for an event/player/market triple
pub trait PredictionSource: Send + Sync {
    fn resolve(&self, scenario: &SimulationScenario) -> Result<PredictionInput>;

    /// Source name for logging and debugging
    fn source_name(&self) -> &str {
        "unnamed"
    }
}

/// In-memory source keyed by `(event_id, player, market)`.
///
/// Deterministic stand-in for a live model; used by tests and demos.
#[derive(Default)]
pub struct StaticPredictionSource {
    predictions: FxHashMap<(String, String, String), PredictionInput>,
}

impl StaticPredictionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scenario: &SimulationScenario, prediction: PredictionInput) {
        self.predictions.insert(Self::key(scenario), prediction);
    }

    fn key(scenario: &SimulationScenario) -> (String, String, String) {
        (
            scenario.event_id.clone(),
            scenario.player.clone(),
            scenario.market.clone(),
        )
    }
}

impl PredictionSource for StaticPredictionSource {
    fn resolve(&self, scenario: &SimulationScenario) -> Result<PredictionInput> {
        self.predictions
            .get(&Self::key(scenario))
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no prediction for event={} player={} market={}",
                    scenario.event_id,
                    scenario.player,
                    scenario.market
                )
            })
    }

    fn source_name(&self) -> &str {
        "static"
    }
}
