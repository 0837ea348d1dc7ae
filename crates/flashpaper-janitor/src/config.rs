//! Configuration for Janitor operations
//!
//! Defines the sweep interval and operational mode.

use crate::JanitorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Janitor service
///
/// # Examples
///
/// ```
/// use flashpaper_janitor::JanitorConfig;
///
/// // Default configuration: sweep every 10 seconds
/// let config = JanitorConfig::default();
/// assert_eq!(config.sweep_interval_secs, 10);
///
/// // Aggressive cleanup
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.sweep_interval_secs, 2);
///
/// // Lenient cleanup
/// let config = JanitorConfig::lenient();
/// assert_eq!(config.sweep_interval_secs, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// How often to run the sweep cycle (in seconds)
    /// Default: every 10 seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Dry-run mode: log what would be deleted without actually deleting
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_sweep_interval_secs() -> u64 {
    10
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Frequent sweeps for deployments where dead rows should not linger
    pub fn aggressive() -> Self {
        Self {
            sweep_interval_secs: 2,
            dry_run: false,
        }
    }

    /// Infrequent sweeps for development or low-traffic deployments
    pub fn lenient() -> Self {
        Self {
            sweep_interval_secs: 60,
            dry_run: false,
        }
    }

    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Reject settings the worker cannot run with
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.sweep_interval_secs == 0 {
            return Err(JanitorError::Config(
                "sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.sweep_interval_secs, 10);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let default = JanitorConfig::default();
        assert!(JanitorConfig::aggressive().sweep_interval_secs < default.sweep_interval_secs);
        assert!(JanitorConfig::lenient().sweep_interval_secs > default.sweep_interval_secs);
    }

    #[test]
    fn test_duration_conversion() {
        let config = JanitorConfig::default();
        assert_eq!(config.sweep_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = JanitorConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: JanitorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, JanitorConfig::default());

        let config: JanitorConfig = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert_eq!(config.sweep_interval_secs, 10);
        assert!(config.dry_run);
    }
}
