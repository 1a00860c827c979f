//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling temperature for decomposition calls
    pub temperature: f32,

    /// Maximum claims kept per backstory
    pub max_claims: usize,

    /// Maximum search queries kept per claim
    pub max_queries: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be in [0.0, 2.0], got {}", self.temperature));
        }
        if self.max_claims == 0 {
            return Err("max_claims must be greater than 0".to_string());
        }
        if self.max_queries == 0 {
            return Err("max_queries must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_claims: 5,
            max_queries: 3,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_claims() {
        let mut config = ExtractorConfig::default();
        config.max_claims = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = ExtractorConfig::default();
        config.temperature = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml() {
        let config = ExtractorConfig::from_toml("max_claims = 3").unwrap();
        assert_eq!(config.max_claims, 3);
        assert_eq!(config.max_queries, 3);
    }
}
