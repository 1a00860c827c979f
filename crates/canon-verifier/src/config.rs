//! Verifier configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for judging claims and aggregating verdicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Minimum confidence for a CONTRADICT judgment to count (inclusive)
    pub contradiction_threshold: f64,

    /// Attempts per claim, shared by all rate-limit retries
    pub retry_budget: u32,

    /// Base of the exponential backoff after a rate limit
    pub backoff_base: f64,

    /// Seconds added to every backoff
    pub backoff_offset_secs: f64,

    /// Sampling temperature for judgment calls
    pub temperature: f32,

    /// Separator between per-claim rationales
    pub rationale_separator: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            contradiction_threshold: 0.4,
            retry_budget: 2,
            backoff_base: 2.0,
            backoff_offset_secs: 1.0,
            temperature: 0.0,
            rationale_separator: " | ".to_string(),
        }
    }
}

impl VerifierConfig {
    /// Backoff before the retry that follows attempt `attempt` (0-based)
    ///
    /// `base^attempt + offset` seconds: 2s after the first attempt, 3s after
    /// the second with the defaults.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let secs = self.backoff_base.powi(attempt as i32) + self.backoff_offset_secs;
        Duration::from_secs_f64(secs.max(0.0))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.contradiction_threshold) {
            return Err(format!(
                "contradiction_threshold must be in [0.0, 1.0], got {}",
                self.contradiction_threshold
            ));
        }
        if self.retry_budget == 0 {
            return Err("retry_budget must be greater than 0".to_string());
        }
        if !self.backoff_base.is_finite() || self.backoff_base < 1.0 {
            return Err(format!("backoff_base must be at least 1.0, got {}", self.backoff_base));
        }
        if !self.backoff_offset_secs.is_finite() || self.backoff_offset_secs < 0.0 {
            return Err("backoff_offset_secs must be non-negative".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be in [0.0, 2.0], got {}", self.temperature));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(VerifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_backoff_schedule() {
        let config = VerifierConfig::default();
        assert_eq!(config.backoff(0), Duration::from_secs(2));
        assert_eq!(config.backoff(1), Duration::from_secs(3));
        assert_eq!(config.backoff(2), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_threshold() {
        let config = VerifierConfig {
            contradiction_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = VerifierConfig {
            retry_budget: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = VerifierConfig {
            contradiction_threshold: 0.7,
            retry_budget: 3,
            ..Default::default()
        };
        let parsed = VerifierConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
