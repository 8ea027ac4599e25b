//! WagerSim Core - Bet evaluation and arbitrage staking engine.
//!
//! This library provides:
//! - Monte Carlo simulation of single-wager scenarios (EV, ROI, dispersion
//!   statistics, 95% confidence interval on the mean outcome)
//! - Kelly criterion stake sizing
//! - Qualitative risk classification with human-readable rationale
//! - Two-sided arbitrage stake allocation with guaranteed-profit math
//! - Batch orchestration across scenarios and an interval-driven recurring
//!   mode with cancellation
//!
//! The engine is a pure, stateless computation over caller-supplied inputs:
//! win probabilities come from a pluggable [`PredictionSource`], randomness
//! from an injectable [`RandomSource`], so every run is reproducible under a
//! fixed seed.
//!
//! # Example
//!
//! ```
//! use wagersim_core::{simulate, PredictionInput, SeededRandom, SimulationScenario};
//!
//! let scenario = SimulationScenario::new(100.0, 2.2, "evt-1", "J. Smith", "points_over")
//!     .with_iterations(10_000);
//! let prediction = PredictionInput::new(0.5, 0.45, 0.55);
//!
//! let result = simulate(&scenario, &prediction, SeededRandom::new(42)).unwrap();
//! println!("EV per trial: {:.2}", result.expected_value);
//! ```

pub mod arbitrage;
pub mod batch;
pub mod error;
pub mod kelly;
pub mod prediction;
pub mod random;
pub mod risk;
pub mod simulation;
pub mod stats;
mod types;

// Re-export commonly used types and entry points
pub use arbitrage::{allocate_arbitrage, build_opportunity, combined_implied_probability};
pub use batch::{BatchResults, BatchRunner, RecurringSimulation};
pub use error::EngineError;
pub use kelly::{kelly_fraction, kelly_fraction_raw, recommended_stake};
pub use prediction::{PredictionSource, StaticPredictionSource};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use risk::classify_risk;
pub use simulation::{simulate, simulate_default};
pub use types::*;
