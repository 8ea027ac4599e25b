//! Batch and recurring simulation orchestration.
//!
//! Scenarios are independent, so batch runs fan out across the rayon pool.
//! Reproducibility survives the parallelism: each scenario draws from its
//! own RNG seeded from the batch seed plus the scenario's position, so trial
//! order within a scenario is unchanged and scenario completion order does
//! not matter.
//!
//! The recurring mode re-simulates one active scenario on a fixed cadence,
//! always overwriting the previous result. Results are written whole under a
//! lock; cancellation can never expose a partially-written result.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rand::Rng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::prediction::PredictionSource;
use crate::random::SeededRandom;
use crate::simulation::simulate;
use crate::types::{SimulationResult, SimulationScenario};

/// Per-scenario outcome of a batch run
pub type BatchResults = FxHashMap<String, Result<SimulationResult, EngineError>>;

/// Runs simulations across many scenarios with per-item failure isolation
pub struct BatchRunner {
    base_seed: u64,
}

impl BatchRunner {
    /// Runner with OS-chosen randomness (a fresh base seed per construction)
    pub fn new() -> Self {
        Self {
            base_seed: rand::thread_rng().gen(),
        }
    }

    /// Runner whose batch runs are reproducible for a fixed scenario list
    pub fn with_seed(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Simulate every scenario, keyed by scenario id.
    ///
    /// A failing scenario (validation or prediction resolution) is reported
    /// as an error under its id and never aborts the rest of the batch.
    /// Duplicate ids resolve last-run-wins.
    pub fn run_batch(
        &self,
        scenarios: &[SimulationScenario],
        source: &dyn PredictionSource,
    ) -> BatchResults {
        let outcomes: Vec<(String, Result<SimulationResult, EngineError>)> = scenarios
            .par_iter()
            .enumerate()
            .map(|(position, scenario)| {
                let outcome = self.run_one(scenario, position as u64, source);
                (scenario.id.clone(), outcome)
            })
            .collect();

        let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            scenarios = scenarios.len(),
            failed,
            source = source.source_name(),
            "batch run complete"
        );

        // Sequential insertion in scenario order makes duplicates last-run-wins
        let mut results = BatchResults::default();
        for (id, outcome) in outcomes {
            results.insert(id, outcome);
        }
        results
    }

    fn run_one(
        &self,
        scenario: &SimulationScenario,
        position: u64,
        source: &dyn PredictionSource,
    ) -> Result<SimulationResult, EngineError> {
        let prediction = source.resolve(scenario).map_err(|err| {
            warn!(scenario_id = %scenario.id, %err, "prediction unavailable");
            EngineError::PredictionUnavailable {
                scenario_id: scenario.id.clone(),
                reason: err.to_string(),
            }
        })?;

        let rng = SeededRandom::new(self.base_seed.wrapping_add(position));
        simulate(scenario, &prediction, rng)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Interval-driven re-simulation of one active scenario.
///
/// Each completed run replaces the previous result; history is never
/// accumulated. Dropping or stopping the handle cancels the loop.
pub struct RecurringSimulation {
    latest: Arc<RwLock<Option<SimulationResult>>>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RecurringSimulation {
    /// Spawn the recurring loop on the current tokio runtime
    pub fn start(
        scenario: SimulationScenario,
        source: Arc<dyn PredictionSource>,
        every: Duration,
    ) -> Self {
        let latest: Arc<RwLock<Option<SimulationResult>>> = Arc::new(RwLock::new(None));
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let slot = latest.clone();
        let handle = tokio::spawn(async move {
            info!(scenario_id = %scenario.id, interval_ms = every.as_millis() as u64, "recurring simulation started");
            let mut ticker = tokio::time::interval(every);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match source
                            .resolve(&scenario)
                            .map_err(|err| EngineError::PredictionUnavailable {
                                scenario_id: scenario.id.clone(),
                                reason: err.to_string(),
                            })
                            .and_then(|prediction| {
                                simulate(&scenario, &prediction, crate::random::ThreadRandom)
                            }) {
                            Ok(result) => {
                                debug!(scenario_id = %scenario.id, ev = result.expected_value, "recurring result updated");
                                *slot.write() = Some(result);
                            }
                            Err(err) => {
                                // Keep the previous result on failure
                                warn!(scenario_id = %scenario.id, %err, "recurring simulation failed");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!(scenario_id = %scenario.id, "recurring simulation stopped");
                        break;
                    }
                }
            }
        });

        Self {
            latest,
            shutdown,
            handle,
        }
    }

    /// Most recent completed result, if any run has finished yet
    pub fn latest(&self) -> Option<SimulationResult> {
        self.latest.read().clone()
    }

    /// Stop the timer and wait for the loop to wind down
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::StaticPredictionSource;
    use crate::types::PredictionInput;

    fn scenario(id: &str, stake: f64, odds: f64) -> SimulationScenario {
        SimulationScenario::new(stake, odds, format!("evt-{}", id), "J. Smith", "points_over")
            .with_id(id)
            .with_iterations(2_000)
    }

    fn source_for(scenarios: &[&SimulationScenario], p: f64) -> StaticPredictionSource {
        let mut source = StaticPredictionSource::new();
        for s in scenarios {
            source.insert(s, PredictionInput::new(p, p - 0.05, p + 0.05));
        }
        source
    }

    #[test]
    fn test_batch_keys_results_by_scenario_id() {
        let a = scenario("a", 100.0, 2.2);
        let b = scenario("b", 50.0, 1.8);
        let source = source_for(&[&a, &b], 0.5);

        let results = BatchRunner::with_seed(7).run_batch(&[a, b], &source);
        assert_eq!(results.len(), 2);
        assert!(results["a"].is_ok());
        assert!(results["b"].is_ok());
        assert_eq!(results["a"].as_ref().unwrap().scenario_id, "a");
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = scenario("good", 100.0, 2.2);
        let invalid = scenario("invalid", 100.0, 1.0); // odds rejected
        let unresolved = scenario("unresolved", 100.0, 2.0);

        // Prediction registered for the first two only
        let source = source_for(&[&good, &invalid], 0.5);
        let results =
            BatchRunner::with_seed(7).run_batch(&[good, invalid, unresolved], &source);

        assert!(results["good"].is_ok());
        assert!(matches!(
            results["invalid"],
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            results["unresolved"],
            Err(EngineError::PredictionUnavailable { .. })
        ));
    }

    #[test]
    fn test_batch_is_seed_deterministic() {
        let scenarios: Vec<_> = (0..8)
            .map(|i| scenario(&format!("s{}", i), 100.0, 2.2))
            .collect();
        let refs: Vec<_> = scenarios.iter().collect();
        let source = source_for(&refs, 0.55);

        let first = BatchRunner::with_seed(42).run_batch(&scenarios, &source);
        let second = BatchRunner::with_seed(42).run_batch(&scenarios, &source);
        for (id, outcome) in &first {
            let a = outcome.as_ref().unwrap();
            let b = second[id].as_ref().unwrap();
            assert_eq!(a.breakdown.wins, b.breakdown.wins, "mismatch for {}", id);
            assert_eq!(a.expected_value, b.expected_value, "mismatch for {}", id);
        }
    }

    #[test]
    fn test_batch_duplicate_ids_last_run_wins() {
        let early = scenario("dup", 100.0, 2.2);
        let late = scenario("dup", 100.0, 5.0);
        let source = source_for(&[&early, &late], 0.5);

        let results = BatchRunner::with_seed(1).run_batch(&[early, late], &source);
        assert_eq!(results.len(), 1);
        // Kelly at p=0.5, odds=5.0 is (4*0.5 - 0.5)/4 = 0.375; odds 2.2 gives 0.083
        let kept = results["dup"].as_ref().unwrap();
        assert!(
            (kept.kelly_fraction - 0.375).abs() < 1e-9,
            "expected the later scenario's result, got kelly {}",
            kept.kelly_fraction
        );
    }

    #[tokio::test]
    async fn test_recurring_overwrites_and_stops() {
        let s = scenario("live", 100.0, 2.2).with_iterations(200);
        let source = Arc::new(source_for(&[&s], 0.5));

        let recurring =
            RecurringSimulation::start(s, source, Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(80)).await;
        let first = recurring.latest().expect("a result after several ticks");

        tokio::time::sleep(Duration::from_millis(80)).await;
        let second = recurring.latest().expect("still producing results");
        assert_eq!(second.scenario_id, "live");
        assert!(
            second.simulated_at >= first.simulated_at,
            "later read should never observe an older result"
        );

        recurring.stop().await;
    }

    #[tokio::test]
    async fn test_recurring_keeps_last_result_on_failure() {
        // No prediction registered: every tick fails, slot stays empty
        let s = scenario("dead", 100.0, 2.2).with_iterations(100);
        let source = Arc::new(StaticPredictionSource::new());

        let recurring =
            RecurringSimulation::start(s, source, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(recurring.latest().is_none());
        recurring.stop().await;
    }
}
