//! Remote advisor strategy backed by the Gemini REST API
//!
//! Builds a prompt embedding every feature field plus the explicit decision
//! rules, calls `generateContent`, and parses the first JSON object found
//! in the response text. Every failure surfaces as an `Err` so the policy
//! layer can fall back to the rule engine.

use crate::config::AdvisorConfig;
use crate::error::ArborAiError;
use crate::models::{FeatureRecord, Priority, Recommendation, Suitability};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use super::DecisionStrategy;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

/// Model output fields; any key may be missing and gets a default
#[derive(Debug, Deserialize)]
struct ModelOutput {
    priority: Option<String>,
    suitability: Option<String>,
    reason: Option<String>,
    recommendation: Option<String>,
    commercial_advice: Option<String>,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// Errors with a configuration error when no API key is set; callers
    /// that cannot tolerate that should check `has_remote_advisor` first.
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| ArborAiError::config("No GOOGLE_API_KEY configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ArborAI/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: config.gemini_model.clone(),
        })
    }

    /// Send one prompt and return the model's text response
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{GEMINI_BASE_URL}/{}:generateContent", self.model);
        let payload = json!({"contents": [{"parts": [{"text": prompt}]}]});

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArborAiError::api(format!("Gemini returned {status}: {body}")).into());
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Gemini response body")?;

        // The candidate layout varies; fall back to the raw JSON so the
        // caller's JSON-object scan still has something to work with.
        Ok(extract_candidate_text(&body).unwrap_or_else(|| body.to_string()))
    }
}

/// Pull the response text out of the first candidate, probing the shapes
/// the API has been seen to return
fn extract_candidate_text(body: &Value) -> Option<String> {
    let content = body.get("candidates")?.as_array()?.first()?.get("content")?;

    if let Some(parts) = content.get("parts").and_then(Value::as_array) {
        if let Some(text) = parts.first()?.get("text").and_then(Value::as_str) {
            return Some(text.trim().to_string());
        }
    }

    content.as_str().map(|s| s.trim().to_string())
}

/// Parse a recommendation out of free-form model text
///
/// Takes the substring from the first `{` onward and reads one JSON object,
/// tolerating trailing text such as markdown fences. Missing keys fall back
/// to documented defaults.
pub fn parse_recommendation(text: &str) -> Result<Recommendation> {
    let start = text.find('{').unwrap_or(0);
    let json_text = &text[start..];

    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    let output = ModelOutput::deserialize(&mut deserializer)
        .context("Gemini response did not contain a parseable JSON object")?;

    Ok(Recommendation {
        priority: output
            .priority
            .map_or(Priority::Medium, |p| Priority::parse_lenient(&p)),
        suitability: output
            .suitability
            .map_or(Suitability::Yes, |s| Suitability::parse_lenient(&s)),
        reason: output
            .reason
            .unwrap_or_else(|| "No reason provided.".to_string()),
        recommendation: output.recommendation.unwrap_or_default(),
        commercial_advice: output.commercial_advice.unwrap_or_default(),
    })
}

/// Build the recommendation prompt embedding all features and the decision
/// rules the model must apply
#[must_use]
pub fn build_recommendation_prompt(features: &FeatureRecord) -> String {
    format!(
        r#"You are an expert agronomist. Produce only valid JSON (no extra text) with keys:
- priority: one of "High","Medium","Low"
- suitability: "Yes" or "No"
- reason: one-sentence explanation
- recommendation: short bullet-list string of practical steps
- commercial_advice: short commercial tips (or empty)

User data:
Tree: {}
Soil: {}
Estimated soil pH: {}
Estimated annual rainfall (mm): {}
Average temperature (C): {}
Purpose: {}
Land size (sq m): {}

Rules:
- Loamy/loam/clay and pH 5.5-7.5 favor planting.
- Rainfall >=900 mm increases suitability; <300 mm is low.
- If purpose is commercial and land_size >= 1000, include commercial tips.
Return only JSON."#,
        features.tree,
        features.soil,
        features.ph,
        features.rainfall_mm,
        features.temperature_c,
        features.purpose.as_str(),
        features.land_size_sq_m,
    )
}

/// Remote advisor decision strategy
pub struct GeminiStrategy {
    client: GeminiClient,
}

impl GeminiStrategy {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }
}

#[async_trait]
impl DecisionStrategy for GeminiStrategy {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn decide(&self, features: &FeatureRecord) -> Result<Recommendation> {
        let prompt = build_recommendation_prompt(features);
        debug!("Requesting Gemini recommendation for '{}'", features.tree);

        let text = self.client.generate(&prompt).await?;
        parse_recommendation(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Purpose;

    fn sample_features() -> FeatureRecord {
        FeatureRecord {
            tree: "Mango".to_string(),
            soil: "loamy soil".to_string(),
            soil_raw: "loamy".to_string(),
            region: "Pune, India".to_string(),
            ph: 6.5,
            rainfall_mm: 1200.0,
            temperature_c: 25.0,
            purpose: Purpose::Commercial,
            land_size_sq_m: 2000.0,
        }
    }

    #[test]
    fn test_prompt_embeds_all_features() {
        let prompt = build_recommendation_prompt(&sample_features());
        assert!(prompt.contains("Tree: Mango"));
        assert!(prompt.contains("Soil: loamy soil"));
        assert!(prompt.contains("Estimated soil pH: 6.5"));
        assert!(prompt.contains("Estimated annual rainfall (mm): 1200"));
        assert!(prompt.contains("Purpose: Commercial"));
        assert!(prompt.contains("Land size (sq m): 2000"));
        assert!(prompt.contains("Rainfall >=900 mm"));
    }

    #[test]
    fn test_parse_recommendation_complete() {
        let text = r#"{"priority": "High", "suitability": "Yes",
            "reason": "Good conditions.",
            "recommendation": "Plant in June.",
            "commercial_advice": "Consider drip irrigation."}"#;

        let rec = parse_recommendation(text).unwrap();
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.suitability, Suitability::Yes);
        assert_eq!(rec.reason, "Good conditions.");
        assert_eq!(rec.commercial_advice, "Consider drip irrigation.");
    }

    #[test]
    fn test_parse_recommendation_skips_leading_prose_and_fences() {
        let text = "Here is the result:\n```json\n{\"priority\": \"Low\", \"suitability\": \"No\"}\n```";
        let rec = parse_recommendation(text).unwrap();
        assert_eq!(rec.priority, Priority::Low);
        assert_eq!(rec.suitability, Suitability::No);
    }

    #[test]
    fn test_parse_recommendation_defaults_missing_keys() {
        let rec = parse_recommendation("{}").unwrap();
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.suitability, Suitability::Yes);
        assert_eq!(rec.reason, "No reason provided.");
        assert!(rec.recommendation.is_empty());
        assert!(rec.commercial_advice.is_empty());
    }

    #[test]
    fn test_parse_recommendation_rejects_non_json() {
        assert!(parse_recommendation("I cannot answer that.").is_err());
        assert!(parse_recommendation("").is_err());
    }

    #[test]
    fn test_extract_candidate_text_parts_shape() {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "  hello  "}]}}]
        });
        assert_eq!(extract_candidate_text(&body), Some("hello".to_string()));
    }

    #[test]
    fn test_extract_candidate_text_string_shape() {
        let body = serde_json::json!({"candidates": [{"content": "plain"}]});
        assert_eq!(extract_candidate_text(&body), Some("plain".to_string()));
    }

    #[test]
    fn test_extract_candidate_text_missing() {
        assert_eq!(extract_candidate_text(&serde_json::json!({})), None);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = AdvisorConfig::default();
        assert!(GeminiClient::new(&config).is_err());
    }

    #[test]
    fn test_client_with_api_key() {
        let config = AdvisorConfig {
            gemini_api_key: Some("valid_api_key_123".to_string()),
            ..AdvisorConfig::default()
        };
        assert!(GeminiClient::new(&config).is_ok());
    }
}
