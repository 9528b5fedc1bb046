//! Carpooling impact simulation engine.
//!
//! One invocation draws `n` adoption rates upfront (seeded, reproducible),
//! evaluates every run independently — occupancy transition, mileage
//! reduction, emissions, occupancy-class allocation — and then reconciles the
//! aggregate simulated mileage back to the known national baseline.
//!
//! ## Pipeline
//!
//! 1. Validate [`ScenarioParameters`] (every call — the engine holds no state).
//! 2. Sample `n` clipped adoption rates ([`crate::sampler`]).
//! 3. Per run: `occupancy_after`, `reduced_mileage_km`, `vehicles_saved`,
//!    `emissions_tonnes`, class allocation. Runs are independent pure
//!    functions and evaluated in parallel via rayon; the output order is the
//!    draw order regardless of scheduling.
//! 4. Conservation rescaling: sum class-weighted vehicle counts plus the
//!    non-carpooling contribution (classes 1 and 2) in run-index order,
//!    multiply by `baseline / simulated_total`, and report the residual gap
//!    computed *after* rescaling so it reflects only rounding.
//!
//! A single invalid run aborts the whole invocation: the rescaling step needs
//! a complete run set, so there is no partial result.

use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::constants::{NON_CARPOOL_CLASS_MAX, OCCUPANCY_CLASS_COUNT};
use crate::error::SimulationError;
use crate::occupancy::{allocate_vehicles_by_class, occupancy_after};
use crate::sampler::sample_adoption_rates;
use crate::scenario::ScenarioParameters;

/// One Monte Carlo draw: a hypothetical population under one adoption rate.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationRun {
    /// Sampled carpooling adoption rate (within the scenario clip bounds).
    pub adoption_rate: f64,
    /// Average occupancy after carpooling, >= the baseline occupancy.
    pub occupancy_after: f64,
    /// Total vehicle-kilometers after adoption.
    pub reduced_mileage_km: f64,
    /// Vehicles no longer needed, from the mileage delta.
    pub vehicles_saved: f64,
    /// CO2 under the reduced mileage, in the scenario reporting unit.
    pub emissions_tonnes: f64,
    /// Vehicle count attributed to occupancy class `c` at index `c - 1`.
    /// Classes above `occupancy_after` are zero.
    pub occupancy_allocation: [f64; OCCUPANCY_CLASS_COUNT],
}

/// Aggregate of one engine invocation.
pub struct SimulationResult {
    /// Per-run outputs in draw order.
    pub runs: Vec<SimulationRun>,
    /// Per-class series: `occupancy_distribution[c - 1][i]` is the vehicle
    /// count for class `c` in run `i`. Same length as `runs` per class.
    pub occupancy_distribution: Vec<Vec<f64>>,
    /// Aggregate simulated mileage after conservation rescaling (km).
    pub total_simulated_mileage_km: f64,
    /// `baseline - total_simulated_mileage_km`, computed after rescaling —
    /// a conservation check, not a free parameter.
    pub mileage_gap_km: f64,
    /// Wall-clock time of the invocation (diagnostic).
    pub elapsed: Duration,
}

impl SimulationResult {
    /// Adoption-rate series in draw order.
    pub fn adoption_rates(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.adoption_rate).collect()
    }

    /// Per-run emissions series (reporting unit).
    pub fn emissions_series(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.emissions_tonnes).collect()
    }

    /// Per-run vehicles-saved series.
    pub fn vehicles_saved_series(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.vehicles_saved).collect()
    }

    /// Per-run vehicle counts for one occupancy class (1..=7).
    pub fn class_series(&self, class: usize) -> Option<&[f64]> {
        if (1..=OCCUPANCY_CLASS_COUNT).contains(&class) {
            Some(&self.occupancy_distribution[class - 1])
        } else {
            None
        }
    }
}

#[inline]
fn ensure_finite(value: f64, what: &str) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::NumericOverflow(format!(
            "{} is not finite ({})",
            what, value
        )))
    }
}

/// Evaluate one run. Pure function of `(params, adoption_rate)` — no shared
/// mutable state, safe to call concurrently across runs.
pub fn compute_run(
    params: &ScenarioParameters,
    adoption_rate: f64,
) -> Result<SimulationRun, SimulationError> {
    let occupancy = ensure_finite(occupancy_after(params, adoption_rate), "occupancy_after")?;
    if occupancy <= 0.0 {
        return Err(SimulationError::NumericOverflow(format!(
            "occupancy_after collapsed to {} at adoption rate {}",
            occupancy, adoption_rate
        )));
    }

    // Fewer vehicle-trips through shared rides, plus a direct reduction
    // proportional to the adoption share.
    let reduced_mileage_km = ensure_finite(
        params.baseline_mileage_km * (params.occupancy_before / occupancy) * (1.0 - adoption_rate),
        "reduced_mileage_km",
    )?;

    let vehicles_saved = ensure_finite(
        (params.baseline_mileage_km - reduced_mileage_km) / params.average_annual_mileage_km,
        "vehicles_saved",
    )?;

    let emissions_tonnes = ensure_finite(
        reduced_mileage_km * params.weighted_emission_factor() / params.emissions_unit_scale,
        "emissions_tonnes",
    )?;

    let occupancy_allocation = allocate_vehicles_by_class(params, occupancy, reduced_mileage_km);

    Ok(SimulationRun {
        adoption_rate,
        occupancy_after: occupancy,
        reduced_mileage_km,
        vehicles_saved,
        emissions_tonnes,
        occupancy_allocation,
    })
}

/// Sum the class-weighted vehicle counts plus the non-carpooling contribution
/// (classes 1 and 2 drive as-is and are counted once more, unweighted).
/// Always accumulated in run-index order so parallel evaluation of the runs
/// cannot change the floating-point result.
fn simulated_total(runs: &[SimulationRun]) -> f64 {
    let mut total = 0.0;
    for run in runs {
        for c in 1..=OCCUPANCY_CLASS_COUNT {
            total += run.occupancy_allocation[c - 1] * c as f64;
        }
        for c in 1..=NON_CARPOOL_CLASS_MAX {
            total += run.occupancy_allocation[c - 1];
        }
    }
    total
}

/// Run the full simulation: `n_runs` draws under `params`, seeded by `seed`.
///
/// Deterministic for a fixed `(params, n_runs, seed)` triple. Fails fast with
/// no partial result on the first invalid run.
pub fn run_simulation(
    params: &ScenarioParameters,
    n_runs: usize,
    seed: u64,
) -> Result<SimulationResult, SimulationError> {
    let start = Instant::now();
    params.validate()?;

    let rates = sample_adoption_rates(params, n_runs, seed)?;

    let runs: Vec<SimulationRun> = rates
        .par_iter()
        .map(|&rate| compute_run(params, rate))
        .collect::<Result<_, _>>()?;

    let mut occupancy_distribution: Vec<Vec<f64>> = (0..OCCUPANCY_CLASS_COUNT)
        .map(|_| Vec::with_capacity(runs.len()))
        .collect();
    for run in &runs {
        for c in 0..OCCUPANCY_CLASS_COUNT {
            occupancy_distribution[c].push(run.occupancy_allocation[c]);
        }
    }

    let total = simulated_total(&runs);
    if !total.is_finite() {
        return Err(SimulationError::DegenerateModel(format!(
            "simulated mileage total is not finite ({})",
            total
        )));
    }
    if total == 0.0 {
        return Err(SimulationError::DegenerateModel(
            "simulated mileage total is zero".to_string(),
        ));
    }

    let scaling_factor = params.baseline_mileage_km / total;
    let total_simulated_mileage_km = total * scaling_factor;
    let mileage_gap_km = params.baseline_mileage_km - total_simulated_mileage_km;

    Ok(SimulationResult {
        runs,
        occupancy_distribution,
        total_simulated_mileage_km,
        mileage_gap_km,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_run_zero_adoption_identity() {
        let params = ScenarioParameters::default();
        let run = compute_run(&params, 0.0).unwrap();
        assert_eq!(run.occupancy_after, params.occupancy_before);
        assert_eq!(run.reduced_mileage_km, params.baseline_mileage_km);
        assert_eq!(run.vehicles_saved, 0.0);
    }

    #[test]
    fn test_reduced_mileage_never_exceeds_baseline() {
        let params = ScenarioParameters::default();
        for i in 0..=90 {
            let rate = i as f64 / 100.0;
            let run = compute_run(&params, rate).unwrap();
            assert!(
                run.reduced_mileage_km <= params.baseline_mileage_km,
                "rate {} reduced {}",
                rate,
                run.reduced_mileage_km
            );
        }
    }

    #[test]
    fn test_run_simulation_deterministic() {
        let params = ScenarioParameters::default();
        let a = run_simulation(&params, 200, 42).unwrap();
        let b = run_simulation(&params, 200, 42).unwrap();
        assert_eq!(a.runs.len(), b.runs.len());
        for (ra, rb) in a.runs.iter().zip(&b.runs) {
            assert_eq!(ra.adoption_rate, rb.adoption_rate);
            assert_eq!(ra.emissions_tonnes, rb.emissions_tonnes);
            assert_eq!(ra.occupancy_allocation, rb.occupancy_allocation);
        }
        assert_eq!(a.total_simulated_mileage_km, b.total_simulated_mileage_km);
        assert_eq!(a.mileage_gap_km, b.mileage_gap_km);
    }

    #[test]
    fn test_conservation_after_rescaling() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 500, 42).unwrap();
        let relative_gap = result.mileage_gap_km.abs() / params.baseline_mileage_km;
        assert!(relative_gap < 1e-6, "relative gap {}", relative_gap);
    }

    #[test]
    fn test_zero_runs_is_invalid_input() {
        let params = ScenarioParameters::default();
        assert!(matches!(
            run_simulation(&params, 0, 42),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_full_adoption_everywhere_is_degenerate() {
        // Every draw saturates at a clip bound of exactly 1.0, so the reduced
        // mileage of every run is zero and the rescaling denominator vanishes.
        let mut params = ScenarioParameters::default();
        params.adoption_mean = 5.0;
        params.adoption_std_dev = 0.0;
        params.adoption_clip = (0.5, 1.0);
        assert!(matches!(
            run_simulation(&params, 10, 42),
            Err(SimulationError::DegenerateModel(_))
        ));
    }

    #[test]
    fn test_overflowing_baseline_is_numeric_overflow() {
        // f64::MAX passes validation (finite, positive) but the emissions
        // product overflows to infinity inside the run computation.
        let mut params = ScenarioParameters::default();
        params.baseline_mileage_km = f64::MAX;
        assert!(matches!(
            run_simulation(&params, 10, 42),
            Err(SimulationError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_series_accessors_shapes() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 100, 42).unwrap();
        assert_eq!(result.adoption_rates().len(), 100);
        assert_eq!(result.emissions_series().len(), 100);
        assert_eq!(result.vehicles_saved_series().len(), 100);
        for class in 1..=OCCUPANCY_CLASS_COUNT {
            assert_eq!(result.class_series(class).unwrap().len(), 100);
        }
        assert!(result.class_series(0).is_none());
        assert!(result.class_series(8).is_none());
    }

    #[test]
    fn test_allocation_zero_above_occupancy_in_every_run() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 300, 42).unwrap();
        for run in &result.runs {
            for c in 1..=OCCUPANCY_CLASS_COUNT {
                if c as f64 > run.occupancy_after {
                    assert_eq!(
                        run.occupancy_allocation[c - 1], 0.0,
                        "class {} above occupancy {}",
                        c, run.occupancy_after
                    );
                }
            }
        }
    }
}
