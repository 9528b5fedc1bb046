//! Occupancy transition model and per-run occupancy-class allocation.
//!
//! ## Transition model
//!
//! `occupancy_after = before + gain * (1 - exp(-k * adoption_rate))`
//!
//! Strictly increasing in the adoption rate with diminishing returns: higher
//! adoption saturates occupancy gains instead of growing linearly, reflecting
//! the practical ceiling on vehicle capacity. The asymptote is
//! `before + gain` (8.0 occupants in the default scenario).
//!
//! ## Class allocation
//!
//! Each run's reduced mileage, converted to a vehicle count via the per-vehicle
//! highway mileage, is split across occupancy classes 1..=7. A class `c` is
//! eligible only when `c <= occupancy_after`; eligible classes receive weight
//! `1/c` (higher-occupancy configurations are rarer). The raw `1/c` weights do
//! not sum to 1, so they are normalized over the eligible set — each run's
//! allocation sums exactly to its vehicle total, and the global conservation
//! rescale stays a pure correction instead of masking a per-run shortfall.

use crate::constants::OCCUPANCY_CLASS_COUNT;
use crate::scenario::ScenarioParameters;

/// Average occupancy after carpooling at the given adoption rate.
#[inline]
pub fn occupancy_after(params: &ScenarioParameters, adoption_rate: f64) -> f64 {
    params.occupancy_before
        + params.occupancy_max_gain * (1.0 - (-params.saturation_rate * adoption_rate).exp())
}

/// Split one run's vehicle total across occupancy classes 1..=7.
///
/// Entry `c - 1` holds the vehicle count attributed to class `c`. Classes
/// above `occupancy_after` stay zero. Returns all zeros when no class is
/// eligible (occupancy below 1 — a degenerate scenario the rescaling step
/// reports as such).
pub fn allocate_vehicles_by_class(
    params: &ScenarioParameters,
    occupancy_after: f64,
    reduced_mileage_km: f64,
) -> [f64; OCCUPANCY_CLASS_COUNT] {
    let mut allocation = [0.0; OCCUPANCY_CLASS_COUNT];

    let weight_sum: f64 = (1..=OCCUPANCY_CLASS_COUNT)
        .filter(|&c| c as f64 <= occupancy_after)
        .map(|c| 1.0 / c as f64)
        .sum();
    if weight_sum == 0.0 {
        return allocation;
    }

    let total_vehicles = reduced_mileage_km / params.highway_mileage_per_vehicle_km();
    for c in 1..=OCCUPANCY_CLASS_COUNT {
        if c as f64 <= occupancy_after {
            allocation[c - 1] = total_vehicles * (1.0 / c as f64) / weight_sum;
        }
    }
    allocation
}
