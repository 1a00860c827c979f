//! Configuration for the reasoning-service connection

use crate::chat::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reasoning-service settings
///
/// Credentials are deliberately absent; they come from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Minimum gap between call starts (seconds)
    pub inter_call_delay_secs: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            inter_call_delay_secs: 3.0,
        }
    }
}

impl LlmConfig {
    /// Get the pacing interval as a Duration
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_secs_f64(self.inter_call_delay_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !self.inter_call_delay_secs.is_finite() || self.inter_call_delay_secs < 0.0 {
            return Err(format!(
                "inter_call_delay_secs must be a non-negative number, got {}",
                self.inter_call_delay_secs
            ));
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
