//! Configuration for validation runs

use serde::{Deserialize, Serialize};

/// What to record for a row whose processing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrashFallback {
    /// Predict 1 and keep the row's real truth label
    #[default]
    CarryTruth,

    /// Predict 1 and record truth 1 regardless of the row's label
    ///
    /// Reproduces results produced by earlier versions of the checker.
    /// Skews the metrics toward "consistent".
    Legacy,
}

impl CrashFallback {
    /// (truth, prediction) recorded for a crashed row
    pub fn labels(&self, truth: i64) -> (i64, i64) {
        match self {
            CrashFallback::CarryTruth => (truth, 1),
            CrashFallback::Legacy => (1, 1),
        }
    }
}

/// Configuration for the ValidationRunner
///
/// # Examples
///
/// ```
/// use canon_runner::{CrashFallback, RunnerConfig};
///
/// let config = RunnerConfig::from_toml("limit = 10\ncrash_fallback = \"legacy\"").unwrap();
/// assert_eq!(config.limit, Some(10));
/// assert_eq!(config.crash_fallback, CrashFallback::Legacy);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Process only the first N rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Fallback policy for rows that fail
    pub crash_fallback: CrashFallback,
}

impl RunnerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == Some(0) {
            return Err("limit must be greater than 0 when set".to_string());
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
