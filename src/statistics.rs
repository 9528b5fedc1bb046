//! Aggregate summary statistics over a simulation result.
//!
//! Condenses the per-run series into the figures a consumer would display:
//! distribution summaries for adoption, emissions, and vehicles saved, the
//! per-class mean vehicle counts, and the conservation totals.

use serde::Serialize;

use crate::constants::OCCUPANCY_CLASS_COUNT;
use crate::engine::SimulationResult;

// ── Top-level statistics ────────────────────────────────────────────

#[derive(Serialize)]
pub struct SimulationStatistics {
    pub num_runs: u64,
    pub seed: u64,
    pub adoption_rate: SeriesSummary,
    pub emissions_tonnes: SeriesSummary,
    pub vehicles_saved: SeriesSummary,
    /// Mean vehicle count per occupancy class (index c-1 for class c).
    pub class_mean_vehicles: Vec<f64>,
    pub total_simulated_mileage_km: f64,
    pub mileage_gap_km: f64,
}

/// Distribution summary of one per-run series.
#[derive(Serialize)]
pub struct SeriesSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub p5: f64,
    pub p95: f64,
}

// ── Aggregation ─────────────────────────────────────────────────────

fn summarize(values: &[f64]) -> SeriesSummary {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let percentile = |p: f64| -> f64 {
        let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    };

    SeriesSummary {
        mean,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: *sorted.last().unwrap_or(&f64::NAN),
        median: percentile(50.0),
        p5: percentile(5.0),
        p95: percentile(95.0),
    }
}

/// Aggregate statistics from a complete simulation result.
pub fn aggregate_statistics(result: &SimulationResult, seed: u64) -> SimulationStatistics {
    let n = result.runs.len() as f64;
    let class_mean_vehicles = (0..OCCUPANCY_CLASS_COUNT)
        .map(|c| result.occupancy_distribution[c].iter().sum::<f64>() / n)
        .collect();

    SimulationStatistics {
        num_runs: result.runs.len() as u64,
        seed,
        adoption_rate: summarize(&result.adoption_rates()),
        emissions_tonnes: summarize(&result.emissions_series()),
        vehicles_saved: summarize(&result.vehicles_saved_series()),
        class_mean_vehicles,
        total_simulated_mileage_km: result.total_simulated_mileage_km,
        mileage_gap_km: result.mileage_gap_km,
    }
}

/// Save aggregated statistics as JSON.
pub fn save_statistics(stats: &SimulationStatistics, path: &str) -> std::io::Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(stats).expect("statistics serialize cannot fail");
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_simulation;
    use crate::scenario::ScenarioParameters;

    #[test]
    fn test_aggregate_basic() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 500, 42).unwrap();
        let stats = aggregate_statistics(&result, 42);

        assert_eq!(stats.num_runs, 500);
        assert_eq!(stats.seed, 42);
        assert_eq!(stats.class_mean_vehicles.len(), OCCUPANCY_CLASS_COUNT);
        assert!(stats.adoption_rate.min <= stats.adoption_rate.max);
        assert!(stats.emissions_tonnes.std_dev >= 0.0);
        assert!((stats.adoption_rate.mean - 0.3).abs() < 0.02);
    }

    #[test]
    fn test_percentiles_ordered() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 1000, 42).unwrap();
        let stats = aggregate_statistics(&result, 42);
        for s in [
            &stats.adoption_rate,
            &stats.emissions_tonnes,
            &stats.vehicles_saved,
        ] {
            assert!(s.min <= s.p5);
            assert!(s.p5 <= s.median);
            assert!(s.median <= s.p95);
            assert!(s.p95 <= s.max);
        }
    }

    #[test]
    fn test_save_load_json() {
        let params = ScenarioParameters::default();
        let result = run_simulation(&params, 50, 42).unwrap();
        let stats = aggregate_statistics(&result, 42);
        let path = "/tmp/carpool_test_stats.json";
        save_statistics(&stats, path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["num_runs"], 50);
        assert_eq!(
            parsed["class_mean_vehicles"].as_array().unwrap().len(),
            OCCUPANCY_CLASS_COUNT
        );

        let _ = std::fs::remove_file(path);
    }
}
