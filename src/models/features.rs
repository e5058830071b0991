//! Geographic coordinates, best-effort soil/climate estimates and the
//! reconciled feature record fed to the decision engine

use crate::models::Purpose;
use serde::{Deserialize, Serialize};

/// Geographic coordinates produced by geocoding a region name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinates for display
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Best-effort soil and climate estimates for a region
///
/// Either field may be absent independently; a failed lookup degrades to
/// `None` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SoilClimateEstimate {
    /// Mean topsoil pH, strictly within (0, 14) when present
    pub ph: Option<f64>,
    /// Annual rainfall in millimetres
    pub rainfall_mm: Option<f64>,
}

impl SoilClimateEstimate {
    /// Estimate with both fields unresolved
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Complete feature set for one advisory request
///
/// Every numeric field holds either a resolved value or a documented
/// default; after reconciliation nothing is ever absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub tree: String,
    /// Canonical soil category after normalization, e.g. "red soil"
    pub soil: String,
    /// Soil text exactly as the user typed it
    pub soil_raw: String,
    pub region: String,
    /// Soil pH (default 6.5 when unresolved)
    pub ph: f64,
    /// Annual rainfall in millimetres (default 800.0)
    pub rainfall_mm: f64,
    /// Average temperature in degrees Celsius (default 25.0)
    pub temperature_c: f64,
    pub purpose: Purpose,
    /// Land size in square metres (default 200.0)
    pub land_size_sq_m: f64,
}
