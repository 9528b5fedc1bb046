//! # carpool-sim — Carpooling Impact Simulation Engine
//!
//! Estimates the effect of increased car-occupancy ("carpooling") adoption on
//! national highway vehicle-kilometers and CO2 emissions using a Monte Carlo
//! model: the relationship between an adoption rate and the resulting average
//! vehicle occupancy is nonlinear and individually variable, so the engine
//! samples a population of hypothetical runs instead of evaluating a
//! closed-form formula.
//!
//! ## Model overview
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | Sampling | [`sampler`] | Draw `n` adoption rates from N(0.3, 0.15), clipped into [0.05, 0.9] |
//! | Occupancy | [`occupancy`] | `before + gain·(1 − exp(−k·rate))` — saturating occupancy gains |
//! | Reduction | [`engine`] | `baseline · (before/after) · (1 − rate)`, vehicles saved, CO2 |
//! | Allocation | [`occupancy`] | Split each run's vehicles over occupancy classes 1..=7 with normalized `1/c` weights |
//! | Conservation | [`engine`] | Rescale the aggregate back to the known national baseline, report the residual gap |
//!
//! All scenario constants live in [`scenario::ScenarioParameters`] (defaults:
//! the Swiss 2021 national-highway baseline in [`constants`]) — nothing is
//! hard-coded into the formulas, so synthetic scenarios are first-class.
//!
//! ## Entry point
//!
//! ```no_run
//! use carpool_sim::engine::run_simulation;
//! use carpool_sim::scenario::ScenarioParameters;
//!
//! let params = ScenarioParameters::default();
//! let result = run_simulation(&params, 1000, 42).unwrap();
//! println!(
//!     "simulated {} km, gap {} km",
//!     result.total_simulated_mileage_km, result.mileage_gap_km
//! );
//! ```
//!
//! The engine is a pure synchronous computation: sampling happens once
//! upfront, runs are evaluated in parallel (rayon) without shared mutable
//! state, and aggregation sums in run-index order so results are bit-stable
//! regardless of scheduling.

pub mod constants;
pub mod engine;
pub mod error;
pub mod occupancy;
pub mod sampler;
pub mod scenario;
pub mod statistics;

pub use engine::{run_simulation, SimulationResult, SimulationRun};
pub use error::SimulationError;
pub use scenario::{EmissionFactors, ScenarioParameters};
pub use statistics::{aggregate_statistics, save_statistics, SimulationStatistics};
