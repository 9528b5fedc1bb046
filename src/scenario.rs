//! Scenario parameters: every model constant as an explicit, named field.
//!
//! Earlier drafts of this model scattered magic numbers (emission factor,
//! occupancy gain, highway share) through the formulas and disagreed on the
//! emission-factor representation. Here each choice is a field of
//! [`ScenarioParameters`], with the Swiss 2021 baseline as [`Default`], so the
//! engine is configuration-driven and testable against synthetic scenarios.

use serde::Serialize;

use crate::constants::*;
use crate::error::SimulationError;

/// CO2 emission factors in g/km, either fleet-averaged or per drivetrain type.
///
/// `PerType` entries are parallel to `ScenarioParameters::vehicle_type_share`:
/// entry `i` is the factor for share `i`. Both variants evaluate through one
/// canonical path, the share-weighted average ([`ScenarioParameters::weighted_emission_factor`]).
#[derive(Clone, Debug, Serialize)]
pub enum EmissionFactors {
    /// One factor for the whole fleet (g CO2 per km).
    Uniform(f64),
    /// One factor per vehicle type, parallel to the share vector.
    PerType(Vec<f64>),
}

/// Immutable scenario inputs for one engine invocation.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioParameters {
    /// Total annual highway vehicle-kilometers before any carpooling.
    pub baseline_mileage_km: f64,
    /// Fleet composition: (type label, fraction). Fractions sum to 1.
    pub vehicle_type_share: Vec<(String, f64)>,
    /// Emission factors in g/km (see [`EmissionFactors`]).
    pub emission_factors: EmissionFactors,
    /// Baseline average occupants per vehicle.
    pub occupancy_before: f64,
    /// Asymptotic occupancy gain at full adoption.
    pub occupancy_max_gain: f64,
    /// Saturation rate `k` of the occupancy transition.
    pub saturation_rate: f64,
    /// Average annual mileage per vehicle (km/year).
    pub average_annual_mileage_km: f64,
    /// Fraction of per-vehicle mileage driven on the highway network.
    pub highway_share: f64,
    /// Divisor from g CO2 to the reporting unit (1e6 for tonnes).
    pub emissions_unit_scale: f64,
    /// Mean of the adoption-rate sampling distribution.
    pub adoption_mean: f64,
    /// Standard deviation of the adoption-rate sampling distribution.
    pub adoption_std_dev: f64,
    /// Saturating clip bounds applied to every sampled adoption rate.
    pub adoption_clip: (f64, f64),
}

impl Default for ScenarioParameters {
    /// Swiss 2021 national-highway baseline.
    fn default() -> Self {
        Self {
            baseline_mileage_km: BASELINE_MILEAGE_KM,
            vehicle_type_share: VEHICLE_TYPE_SHARES
                .iter()
                .map(|&(name, share)| (name.to_string(), share))
                .collect(),
            emission_factors: EmissionFactors::Uniform(EMISSION_FACTOR_G_PER_KM),
            occupancy_before: OCCUPANCY_BEFORE,
            occupancy_max_gain: OCCUPANCY_MAX_GAIN,
            saturation_rate: OCCUPANCY_SATURATION_RATE,
            average_annual_mileage_km: AVERAGE_ANNUAL_MILEAGE_KM,
            highway_share: HIGHWAY_SHARE,
            emissions_unit_scale: EMISSIONS_UNIT_SCALE,
            adoption_mean: ADOPTION_MEAN,
            adoption_std_dev: ADOPTION_STD_DEV,
            adoption_clip: (ADOPTION_CLIP_MIN, ADOPTION_CLIP_MAX),
        }
    }
}

impl ScenarioParameters {
    /// Validate every field. The engine calls this on every invocation —
    /// it holds no configuration state, so prior validation is never assumed.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |msg: String| Err(SimulationError::InvalidInput(msg));

        if !self.baseline_mileage_km.is_finite() || self.baseline_mileage_km <= 0.0 {
            return invalid(format!(
                "baseline_mileage_km must be positive, got {}",
                self.baseline_mileage_km
            ));
        }
        if self.vehicle_type_share.is_empty() {
            return invalid("vehicle_type_share must not be empty".to_string());
        }
        let mut share_sum = 0.0;
        for (name, share) in &self.vehicle_type_share {
            if !share.is_finite() || !(0.0..=1.0).contains(share) {
                return invalid(format!("share for '{}' out of [0,1]: {}", name, share));
            }
            share_sum += share;
        }
        if (share_sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
            return invalid(format!(
                "vehicle_type_share sums to {} (expected 1 within {:e})",
                share_sum, SHARE_SUM_TOLERANCE
            ));
        }
        match &self.emission_factors {
            EmissionFactors::Uniform(f) => {
                if !f.is_finite() || *f < 0.0 {
                    return invalid(format!("uniform emission factor invalid: {}", f));
                }
            }
            EmissionFactors::PerType(factors) => {
                if factors.len() != self.vehicle_type_share.len() {
                    return invalid(format!(
                        "emission factor count {} does not match {} vehicle types",
                        factors.len(),
                        self.vehicle_type_share.len()
                    ));
                }
                for (i, f) in factors.iter().enumerate() {
                    if !f.is_finite() || *f < 0.0 {
                        return invalid(format!("emission factor [{}] invalid: {}", i, f));
                    }
                }
            }
        }
        if !self.occupancy_before.is_finite() || self.occupancy_before < 1.0 {
            return invalid(format!(
                "occupancy_before must be >= 1, got {}",
                self.occupancy_before
            ));
        }
        if !self.occupancy_max_gain.is_finite() || self.occupancy_max_gain < 0.0 {
            return invalid(format!(
                "occupancy_max_gain must be non-negative, got {}",
                self.occupancy_max_gain
            ));
        }
        if !self.saturation_rate.is_finite() || self.saturation_rate <= 0.0 {
            return invalid(format!(
                "saturation_rate must be positive, got {}",
                self.saturation_rate
            ));
        }
        if !self.average_annual_mileage_km.is_finite() || self.average_annual_mileage_km <= 0.0 {
            return invalid(format!(
                "average_annual_mileage_km must be positive, got {}",
                self.average_annual_mileage_km
            ));
        }
        if !self.highway_share.is_finite() || !(self.highway_share > 0.0 && self.highway_share <= 1.0)
        {
            return invalid(format!(
                "highway_share must be in (0,1], got {}",
                self.highway_share
            ));
        }
        if !self.emissions_unit_scale.is_finite() || self.emissions_unit_scale <= 0.0 {
            return invalid(format!(
                "emissions_unit_scale must be positive, got {}",
                self.emissions_unit_scale
            ));
        }
        if !self.adoption_mean.is_finite() {
            return invalid(format!("adoption_mean not finite: {}", self.adoption_mean));
        }
        if !self.adoption_std_dev.is_finite() || self.adoption_std_dev < 0.0 {
            return invalid(format!(
                "adoption_std_dev must be non-negative, got {}",
                self.adoption_std_dev
            ));
        }
        let (lo, hi) = self.adoption_clip;
        if !lo.is_finite() || !hi.is_finite() || !(0.0 < lo && lo < hi && hi <= 1.0) {
            return invalid(format!("adoption_clip bounds invalid: ({}, {})", lo, hi));
        }
        Ok(())
    }

    /// Share-weighted average emission factor in g/km — the single slope
    /// through which `emissions = reduced_mileage * slope / unit_scale`.
    pub fn weighted_emission_factor(&self) -> f64 {
        match &self.emission_factors {
            EmissionFactors::Uniform(f) => {
                f * self.vehicle_type_share.iter().map(|(_, s)| s).sum::<f64>()
            }
            EmissionFactors::PerType(factors) => self
                .vehicle_type_share
                .iter()
                .zip(factors)
                .map(|((_, share), factor)| share * factor)
                .sum(),
        }
    }

    /// Annual highway mileage of one average vehicle (km/year).
    pub fn highway_mileage_per_vehicle_km(&self) -> f64 {
        self.average_annual_mileage_km * self.highway_share
    }
}
