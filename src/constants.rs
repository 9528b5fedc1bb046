//! Default scenario constants: the Swiss 2021 national-highway baseline.
//!
//! Every constant here is a *default*, not a hard-coded model input — the
//! engine reads all of them through [`crate::scenario::ScenarioParameters`],
//! so synthetic scenarios can override any of them in tests or callers.

/// Total annual passenger-car mileage on the national highway network (km, 2021).
pub const BASELINE_MILEAGE_KM: f64 = 22_577_600_000.0;

/// Baseline average occupants per vehicle before any carpooling.
pub const OCCUPANCY_BEFORE: f64 = 1.2;

/// Asymptotic occupancy gain at full adoption. Ceiling is
/// `OCCUPANCY_BEFORE + OCCUPANCY_MAX_GAIN` = 8.0 occupants.
pub const OCCUPANCY_MAX_GAIN: f64 = 6.8;

/// Exponential saturation rate `k` of the occupancy transition
/// `before + gain * (1 - exp(-k * adoption))`.
pub const OCCUPANCY_SATURATION_RATE: f64 = 3.0;

/// Mean of the normal distribution adoption rates are drawn from.
pub const ADOPTION_MEAN: f64 = 0.3;

/// Standard deviation of the adoption-rate distribution.
pub const ADOPTION_STD_DEV: f64 = 0.15;

/// Lower clip bound for sampled adoption rates. Draws below are saturated,
/// not rejected, so the realized distribution is truncated at the tails.
pub const ADOPTION_CLIP_MIN: f64 = 0.05;

/// Upper clip bound for sampled adoption rates.
pub const ADOPTION_CLIP_MAX: f64 = 0.9;

/// Number of discrete occupancy classes (vehicles carrying exactly 1..=7 people).
pub const OCCUPANCY_CLASS_COUNT: usize = 7;

/// Highest occupancy class that does not carpool (classes 1 and 2 drive as-is).
pub const NON_CARPOOL_CLASS_MAX: usize = 2;

/// Fleet-average CO2 emission factor (g/km, passenger cars).
pub const EMISSION_FACTOR_G_PER_KM: f64 = 112.7;

/// Average annual mileage per vehicle (km/year), used to convert saved
/// vehicle-kilometers into saved vehicles.
pub const AVERAGE_ANNUAL_MILEAGE_KM: f64 = 12_580.0;

/// Share of a vehicle's annual mileage driven on the national highway network.
pub const HIGHWAY_SHARE: f64 = 0.40;

/// Divisor taking `g CO2` to the reporting unit (tonnes): 1e6 g per tonne.
pub const EMISSIONS_UNIT_SCALE: f64 = 1_000_000.0;

/// Fleet composition by drivetrain (fractions sum to 1.000).
pub const VEHICLE_TYPE_SHARES: [(&str, f64); 5] = [
    ("benzin", 0.604),
    ("diesel", 0.252),
    ("hybrid", 0.075),
    ("plug-in hybrid", 0.021),
    ("elektro", 0.042),
];

/// Tolerance for the vehicle-type share sum check.
pub const SHARE_SUM_TOLERANCE: f64 = 1e-6;
