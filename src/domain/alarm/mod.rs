//! Alarm domain - drift from the startup baseline

mod baseline_alarm;

pub use baseline_alarm::BaselineAlarm;

/// Baseline alarm configuration
#[derive(Debug, Clone)]
pub struct AlarmSettings {
    pub enabled: bool,
    /// Percent deviation from the baseline that raises the alarm
    pub threshold: f64,
    /// Only alarm on drops
    pub negative_only: bool,
    pub notifications_on: bool,
}

impl AlarmSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            threshold: 0.0,
            negative_only: false,
            notifications_on: false,
        }
    }
}
