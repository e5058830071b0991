//! Advisory pipeline
//!
//! Composes the forward data flow: raw input -> normalizer -> region
//! resolver -> reconciler -> decision engine. Lookup failures degrade to
//! defaults and are reported as informational notices; the pipeline always
//! terminates with a usable recommendation.

use crate::advisor::{self, EngineKind};
use crate::config::AdvisorConfig;
use crate::models::{FeatureRecord, RawInput, Recommendation, SoilClimateEstimate};
use crate::region_resolver::RegionResolver;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a front end needs to render one advisory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub features: FeatureRecord,
    pub recommendation: Recommendation,
    /// Informational messages about degraded lookups
    pub notices: Vec<String>,
    pub engine: EngineKind,
}

/// Service processing one advisory request at a time
pub struct AdvisoryService {
    config: AdvisorConfig,
    resolver: RegionResolver,
}

impl AdvisoryService {
    #[must_use]
    pub fn new(config: AdvisorConfig) -> Self {
        let resolver = RegionResolver::new(&config);
        Self { config, resolver }
    }

    /// Run the full pipeline for one request
    pub async fn advise(&self, raw: &RawInput) -> AdvisoryReport {
        let mut notices = Vec::new();

        let estimate = self.resolve(raw, &mut notices).await;
        let features = crate::reconcile::reconcile(raw, &estimate);
        info!(
            "Reconciled features for '{}': soil='{}', pH={}, rainfall={}mm",
            features.tree, features.soil, features.ph, features.rainfall_mm
        );

        let (recommendation, engine) = advisor::decide(&self.config, &features).await;
        if engine == EngineKind::RuleBased && self.config.has_remote_advisor() {
            notices.push("Remote advisor unavailable; used rule-based fallback.".to_string());
        }

        AdvisoryReport {
            features,
            recommendation,
            notices,
            engine,
        }
    }

    /// Resolve region features, collecting notices for anything that
    /// stayed unknown
    async fn resolve(&self, raw: &RawInput, notices: &mut Vec<String>) -> SoilClimateEstimate {
        if raw.region.trim().is_empty() {
            return SoilClimateEstimate::unknown();
        }

        let Some(coords) = self.resolver.geocode(&raw.region).await else {
            notices.push(format!(
                "Could not geocode region '{}'; using user inputs and defaults.",
                raw.region.trim()
            ));
            return SoilClimateEstimate::unknown();
        };

        let ph = self.resolver.fetch_soil_ph(&coords).await;
        if ph.is_none() {
            notices.push("Could not determine soil pH from external data.".to_string());
        }

        let rainfall_mm = self.resolver.fetch_rainfall(&coords).await;
        if rainfall_mm.is_none() {
            notices.push("Could not determine rainfall from external data.".to_string());
        }

        SoilClimateEstimate { ph, rainfall_mm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Purpose, Suitability};

    fn raw_input() -> RawInput {
        RawInput {
            tree: "Mango".to_string(),
            soil: "loamy".to_string(),
            // No region: the pipeline stays fully offline
            region: String::new(),
            rainfall: "1200".to_string(),
            temperature: Some(25.0),
            purpose: Purpose::Personal,
            land_size: "500".to_string(),
        }
    }

    #[tokio::test]
    async fn test_offline_pipeline_produces_recommendation() {
        let service = AdvisoryService::new(AdvisorConfig::default());
        let report = service.advise(&raw_input()).await;

        assert_eq!(report.engine, EngineKind::RuleBased);
        assert_eq!(report.features.soil, "loamy soil");
        assert_eq!(report.features.ph, 6.5);
        assert_eq!(report.features.rainfall_mm, 1200.0);
        assert_eq!(report.recommendation.priority, Priority::High);
        assert_eq!(report.recommendation.suitability, Suitability::Yes);
        assert!(report.notices.is_empty());
    }

    #[tokio::test]
    async fn test_empty_region_skips_lookups() {
        let service = AdvisoryService::new(AdvisorConfig::default());
        let mut notices = Vec::new();
        let estimate = service.resolve(&raw_input(), &mut notices).await;

        assert_eq!(estimate, SoilClimateEstimate::unknown());
        assert!(notices.is_empty());
    }
}
