//! Configuration management for `ArborAI`
//!
//! All settings come from environment variables, read once at process start.
//! The Gemini credential is optional: without it the advisor falls back to
//! the deterministic rule engine.

use crate::error::ArborAiError;
use anyhow::Result;
use std::env;

/// Default Gemini model used when `GEMINI_MODEL` is unset
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for every outbound HTTP call, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 25;

/// Runtime configuration for the advisory pipeline
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Gemini API key; `None` disables the remote advisor strategy
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier
    pub gemini_model: String,
    /// Timeout applied to each external HTTP call
    pub timeout_seconds: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `GOOGLE_API_KEY`, `GEMINI_MODEL` and `ARBORAI_TIMEOUT_SECONDS`.
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let gemini_model = env::var("GEMINI_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let timeout_seconds = match env::var("ARBORAI_TIMEOUT_SECONDS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ArborAiError::config(format!("ARBORAI_TIMEOUT_SECONDS is not a number: '{raw}'"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        let config = Self {
            gemini_api_key,
            gemini_model,
            timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Whether the remote advisor strategy can be used
    #[must_use]
    pub fn has_remote_advisor(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = &self.gemini_api_key {
            if key.len() < 8 {
                return Err(ArborAiError::config(
                    "Gemini API key appears to be invalid (too short). Please check your key.",
                )
                .into());
            }
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(
                ArborAiError::config("Request timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.gemini_model.is_empty() {
            return Err(ArborAiError::config("Gemini model identifier cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.timeout_seconds, 25);
        assert!(config.gemini_api_key.is_none());
        assert!(!config.has_remote_advisor());
    }

    #[test]
    fn test_validation_accepts_missing_api_key() {
        let config = AdvisorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_short_api_key() {
        let config = AdvisorConfig {
            gemini_api_key: Some("short".to_string()),
            ..AdvisorConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AdvisorConfig {
            timeout_seconds: 0,
            ..AdvisorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remote_advisor_enabled_with_key() {
        let config = AdvisorConfig {
            gemini_api_key: Some("valid_api_key_123".to_string()),
            ..AdvisorConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.has_remote_advisor());
    }
}
