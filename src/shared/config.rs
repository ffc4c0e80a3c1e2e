//! Configuration loading and validation

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::alarm::AlarmSettings;
use crate::domain::price::CycleSettings;
use crate::shared::errors::ConfigError;
use crate::shared::types::SubnetId;

fn default_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_true() -> bool {
    true
}

fn default_alert_volume() -> f64 {
    0.5
}

fn default_alarm_threshold() -> f64 {
    10.0
}

fn default_alarm_volume() -> f64 {
    1.0
}

fn default_fetch_timeout() -> u64 {
    30
}

/// One monitored subnet as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct SubnetEntry {
    pub netuid: SubnetId,
    pub threshold: Option<f64>,
}

/// Monitor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub network: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub interval: u64,
    pub threshold: f64,

    // Cycle alerts
    pub alert_positive: PathBuf,
    pub alert_negative: PathBuf,
    #[serde(default = "default_true")]
    pub alerts_on: bool,
    #[serde(default = "default_alert_volume")]
    pub alert_volume: f64,
    #[serde(default)]
    pub log_threshold_only: bool,
    #[serde(default)]
    pub alerts_positive_only: bool,

    // Notifications
    #[serde(default)]
    pub notifications_on: bool,
    #[serde(default = "default_true")]
    pub notification_sound: bool,
    #[serde(default)]
    pub notification_speak: bool,
    #[serde(default)]
    pub notification_url: Option<String>,

    // Baseline alarm
    #[serde(default)]
    pub alarm_enabled: bool,
    #[serde(default = "default_alarm_threshold")]
    pub alarm_threshold: f64,
    #[serde(default)]
    pub alarm_sound_positive: Option<PathBuf>,
    #[serde(default)]
    pub alarm_sound_negative: Option<PathBuf>,
    #[serde(default = "default_alarm_volume")]
    pub alarm_volume: f64,
    #[serde(default)]
    pub alarm_negative_only: bool,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    pub subnets: Vec<SubnetEntry>,
}

impl MonitorConfig {
    /// Threshold for a subnet, falling back to the global default
    pub fn threshold_for(&self, entry: &SubnetEntry) -> f64 {
        entry.threshold.unwrap_or(self.threshold)
    }

    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            interval_secs: self.interval,
            log_threshold_only: self.log_threshold_only,
            alerts_positive_only: self.alerts_positive_only,
            notifications_on: self.notifications_on,
        }
    }

    pub fn alarm_settings(&self) -> AlarmSettings {
        AlarmSettings {
            enabled: self.alarm_enabled,
            threshold: self.alarm_threshold,
            negative_only: self.alarm_negative_only,
            notifications_on: self.notifications_on,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::Invalid("interval must be greater than 0".into()));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "threshold must be a positive percentage, got {}",
                self.threshold
            )));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be greater than 0".into()));
        }
        check_volume("alert_volume", self.alert_volume)?;
        check_volume("alarm_volume", self.alarm_volume)?;

        if self.subnets.is_empty() {
            return Err(ConfigError::Invalid("at least one subnet must be configured".into()));
        }
        let mut seen = HashSet::new();
        for entry in &self.subnets {
            if !seen.insert(entry.netuid) {
                return Err(ConfigError::Invalid(format!(
                    "subnet {} is configured more than once",
                    entry.netuid
                )));
            }
            if let Some(threshold) = entry.threshold {
                if !(threshold.is_finite() && threshold > 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "subnet {} threshold must be positive, got {}",
                        entry.netuid, threshold
                    )));
                }
            }
        }

        if self.alarm_enabled {
            if !(self.alarm_threshold.is_finite() && self.alarm_threshold > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "alarm_threshold must be positive, got {}",
                    self.alarm_threshold
                )));
            }
            if self.alarm_sound_positive.is_none() || self.alarm_sound_negative.is_none() {
                return Err(ConfigError::Invalid(
                    "alarm_sound_positive and alarm_sound_negative are required when alarm_enabled".into(),
                ));
            }
        }
        Ok(())
    }
}

fn check_volume(name: &str, volume: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&volume) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be within [0, 1], got {}", name, volume)))
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MonitorConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<MonitorConfig, ConfigError> {
        let config: MonitorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
