//! Price domain - price feed access and cycle monitoring

mod price_monitor;
mod price_feed;
mod price_analyzer;

pub use price_monitor::{CycleMonitor, MAX_PARALLEL_FETCHES};
pub use price_feed::{GuardedPriceSource, PriceSource};
pub use price_analyzer::PriceAnalyzer;

use crate::shared::types::{AlertDecision, SubnetId};

/// Cycle monitoring configuration
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub interval_secs: u64,
    /// Suppress sub-threshold price lines
    pub log_threshold_only: bool,
    /// Suppress sound and notification for negative cycle alerts
    pub alerts_positive_only: bool,
    pub notifications_on: bool,
}

/// Result of one subnet in one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SubnetOutcome {
    pub subnet: SubnetId,
    pub fetched: bool,
    pub cycle: AlertDecision,
    pub baseline: AlertDecision,
}

impl SubnetOutcome {
    pub fn skipped(subnet: SubnetId) -> Self {
        Self {
            subnet,
            fetched: false,
            cycle: AlertDecision::None,
            baseline: AlertDecision::None,
        }
    }
}
