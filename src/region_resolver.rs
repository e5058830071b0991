//! Geo-feature resolution for a region name
//!
//! Resolves a free-text region into coordinates via Open-Meteo geocoding,
//! then queries SoilGrids for topsoil pH and the Open-Meteo climate API for
//! annual rainfall. Every step is independently best-effort: a network
//! error, timeout, non-success status or unusable payload degrades that
//! datum to `None` and is never propagated to the caller.

use crate::config::AdvisorConfig;
use crate::models::{Coordinates, SoilClimateEstimate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const SOILGRIDS_URL: &str = "https://rest.soilgrids.org/query";
const CLIMATE_URL: &str = "https://climate-api.open-meteo.com/v1/climate";

/// Client for the external geocoding, soil and climate providers
pub struct RegionResolver {
    client: Client,
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

impl RegionResolver {
    /// Create a resolver with the configured per-call timeout
    #[must_use]
    pub fn new(config: &AdvisorConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ArborAI/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Resolve soil pH and annual rainfall for a region name
    ///
    /// When geocoding fails, both estimates stay unresolved and the
    /// subsequent lookups are skipped entirely.
    pub async fn resolve_region(&self, region: &str) -> SoilClimateEstimate {
        let Some(coords) = self.geocode(region).await else {
            return SoilClimateEstimate::unknown();
        };

        let ph = self.fetch_soil_ph(&coords).await;
        let rainfall_mm = self.fetch_rainfall(&coords).await;
        SoilClimateEstimate { ph, rainfall_mm }
    }

    /// Geocode a region name to coordinates, best match only
    pub async fn geocode(&self, region: &str) -> Option<Coordinates> {
        let name = region.trim();
        if name.is_empty() {
            return None;
        }

        let url = format!(
            "{GEOCODING_URL}?name={}&count=1&language=en&format=json",
            urlencoding::encode(name)
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Geocoding request failed for '{name}': {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Geocoding returned status {} for '{name}'", response.status());
            return None;
        }

        let geocoding: GeocodingResponse = match response.json().await {
            Ok(g) => g,
            Err(e) => {
                warn!("Failed to parse geocoding response: {e}");
                return None;
            }
        };

        let best = geocoding.results.unwrap_or_default().into_iter().next()?;
        let coords = Coordinates::new(best.latitude, best.longitude);
        debug!("Geocoded '{name}' to {}", coords.format());
        Some(coords)
    }

    /// Query SoilGrids for mean topsoil pH at the coordinates
    ///
    /// The provider's response schema is not stable, so extraction walks an
    /// ordered list of strategies before giving up.
    pub async fn fetch_soil_ph(&self, coords: &Coordinates) -> Option<f64> {
        let url = format!(
            "{SOILGRIDS_URL}?lon={}&lat={}",
            coords.longitude, coords.latitude
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("SoilGrids request failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("SoilGrids returned status {}", response.status());
            return None;
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse SoilGrids response: {e}");
                return None;
            }
        };

        extract_ph(&body)
    }

    /// Query the climate API for monthly precipitation and sum one year
    pub async fn fetch_rainfall(&self, coords: &Coordinates) -> Option<f64> {
        let url = format!(
            "{CLIMATE_URL}?latitude={}&longitude={}",
            coords.latitude, coords.longitude
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Climate request failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Climate API returned status {}", response.status());
            return None;
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse climate response: {e}");
                return None;
            }
        };

        annual_rainfall_from_monthly(&body)
    }
}

/// Ordered pH extraction strategies, attempted in sequence
const PH_EXTRACTORS: &[fn(&Value) -> Option<f64>] = &[
    extract_phh2o_mean,
    extract_legacy_phihox,
    extract_scanned_ph,
];

/// Extract a plausible pH from a SoilGrids payload
///
/// Raw values above 14 are assumed to be scaled by 10 and divided down; the
/// result is accepted only strictly inside (0, 14).
pub fn extract_ph(body: &Value) -> Option<f64> {
    let raw = PH_EXTRACTORS.iter().find_map(|extract| extract(body))?;

    let ph = if raw > 14.0 { raw / 10.0 } else { raw };
    if ph > 0.0 && ph < 14.0 {
        Some((ph * 100.0).round() / 100.0)
    } else {
        None
    }
}

/// Current schema: properties.phh2o.mean
fn extract_phh2o_mean(body: &Value) -> Option<f64> {
    body.get("properties")?.get("phh2o")?.get("mean")?.as_f64()
}

/// Older schema: properties.PHIHOX.phh2o_mean
fn extract_legacy_phihox(body: &Value) -> Option<f64> {
    body.get("properties")?
        .get("PHIHOX")?
        .get("phh2o_mean")?
        .as_f64()
}

/// Last resort: scan properties recursively for any numeric value under a
/// key containing "ph"
fn extract_scanned_ph(body: &Value) -> Option<f64> {
    scan_for_ph(body.get("properties")?)
}

fn scan_for_ph(value: &Value) -> Option<f64> {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key.to_lowercase().contains("ph") {
                    if let Some(num) = nested.as_f64() {
                        return Some(num);
                    }
                }
                if let Some(found) = scan_for_ph(nested) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(scan_for_ph),
        _ => None,
    }
}

/// Sum the first twelve monthly precipitation values into an annual figure
///
/// Requires at least 12 monthly entries; fewer yields `None`.
pub fn annual_rainfall_from_monthly(body: &Value) -> Option<f64> {
    let monthly = body
        .get("monthly")?
        .get("precipitation_sum")?
        .as_array()?;
    if monthly.len() < 12 {
        return None;
    }

    let mut annual = 0.0;
    for value in monthly.iter().take(12) {
        annual += value.as_f64()?;
    }
    Some((annual * 10.0).round() / 10.0)
}
