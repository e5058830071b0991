//! Feature reconciliation
//!
//! Merges the user's raw input, its normalized/parsed fields and the
//! resolver's best-effort estimates into one complete `FeatureRecord`.
//! Precedence is evaluated independently per field and is observable
//! behavior: user input wins over resolved estimates, which win over the
//! documented defaults.

use crate::models::{FeatureRecord, RawInput, SoilClimateEstimate};
use crate::normalize;

/// Default soil pH when no estimate is available
pub const DEFAULT_PH: f64 = 6.5;

/// Default annual rainfall in millimetres
pub const DEFAULT_RAINFALL_MM: f64 = 800.0;

/// Default average temperature in degrees Celsius
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;

/// Default land size in square metres
pub const DEFAULT_LAND_SIZE_SQ_M: f64 = 200.0;

/// Build a complete feature record from raw input and resolver output
///
/// - pH: resolved estimate, else 6.5
/// - rainfall: user value, else resolved estimate, else 800 mm (rainfall
///   text that failed to parse earlier is not re-parsed; it lands on the
///   same default)
/// - temperature: user value, else 25.0
/// - land size: user value, else 200 m²
#[must_use]
pub fn reconcile(raw: &RawInput, estimate: &SoilClimateEstimate) -> FeatureRecord {
    let soil = normalize::normalize_soil(&raw.soil);

    let rainfall_mm = normalize::parse_rainfall(&raw.rainfall)
        .or(estimate.rainfall_mm)
        .unwrap_or(DEFAULT_RAINFALL_MM);

    FeatureRecord {
        tree: raw.tree.clone(),
        soil,
        soil_raw: raw.soil.clone(),
        region: raw.region.clone(),
        ph: estimate.ph.unwrap_or(DEFAULT_PH),
        rainfall_mm,
        temperature_c: raw.temperature.unwrap_or(DEFAULT_TEMPERATURE_C),
        purpose: raw.purpose,
        land_size_sq_m: normalize::parse_land_size(&raw.land_size)
            .unwrap_or(DEFAULT_LAND_SIZE_SQ_M),
    }
}
