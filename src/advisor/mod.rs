//! Decision engine
//!
//! Two interchangeable strategies share one contract: the remote Gemini
//! advisor (when a credential is configured) and the deterministic rule
//! engine (always available). The policy tries the remote advisor first
//! and falls back on any failure, so a recommendation is always produced.

pub mod chat;
pub mod gemini;
pub mod rules;

use crate::config::AdvisorConfig;
use crate::models::{FeatureRecord, Recommendation};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

pub use chat::ChatSession;
pub use gemini::{GeminiClient, GeminiStrategy};

/// A decision strategy converts a complete feature record into a
/// recommendation
#[async_trait]
pub trait DecisionStrategy: Send + Sync {
    /// Short identifier for logs and reports
    fn name(&self) -> &'static str;

    async fn decide(&self, features: &FeatureRecord) -> Result<Recommendation>;
}

/// Rule-based decision strategy; infallible and deterministic
pub struct RuleStrategy;

#[async_trait]
impl DecisionStrategy for RuleStrategy {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn decide(&self, features: &FeatureRecord) -> Result<Recommendation> {
        Ok(rules::classify(features))
    }
}

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EngineKind {
    Remote,
    RuleBased,
}

/// Produce exactly one recommendation for the feature record
///
/// The remote advisor runs first if and only if a credential is
/// configured; any remote failure degrades to the rule engine and is never
/// surfaced as an error.
pub async fn decide(
    config: &AdvisorConfig,
    features: &FeatureRecord,
) -> (Recommendation, EngineKind) {
    if config.has_remote_advisor() {
        match remote_decision(config, features).await {
            Ok(recommendation) => {
                info!("Remote advisor produced a recommendation");
                return (recommendation, EngineKind::Remote);
            }
            Err(e) => {
                warn!("Remote advisor failed, falling back to rule engine: {e}");
            }
        }
    }

    let recommendation = rules::classify(features);
    (recommendation, EngineKind::RuleBased)
}

async fn remote_decision(
    config: &AdvisorConfig,
    features: &FeatureRecord,
) -> Result<Recommendation> {
    let strategy = GeminiStrategy::new(config)?;
    strategy.decide(features).await
}
