//! Subnet domain - monitored subnets and their runtime state

mod subnet_registry;

pub use subnet_registry::SubnetRegistry;

use chrono::{DateTime, Utc};

use crate::shared::types::{Price, PriceSample, SubnetId};

/// A monitored subnet and its cycle-alert threshold
#[derive(Debug, Clone, PartialEq)]
pub struct AssetConfig {
    pub id: SubnetId,
    /// Percent move that triggers a cycle alert
    pub threshold: f64,
}

impl AssetConfig {
    pub fn new(id: SubnetId, threshold: f64) -> Self {
        Self { id, threshold }
    }
}

/// Runtime state of one subnet, owned by the monitor
#[derive(Debug, Clone, PartialEq)]
pub struct AssetState {
    pub id: SubnetId,
    pub display_name: Option<String>,
    pub last_price: Option<Price>,
    pub last_check_time: Option<DateTime<Utc>>,
}

impl AssetState {
    pub fn new(id: SubnetId) -> Self {
        Self {
            id,
            display_name: None,
            last_price: None,
            last_check_time: None,
        }
    }

    /// Human readable label, e.g. `19 (inference)` or `Subnet 19`
    pub fn label(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => format!("{} ({})", self.id, name),
            _ => format!("Subnet {}", self.id),
        }
    }

    /// Take the subnet name from a sample without touching the price history
    pub fn adopt_name(&mut self, sample: &PriceSample) {
        if let Some(name) = &sample.name {
            self.display_name = Some(name.clone());
        }
    }

    /// Record a successful sample. The name is only replaced when the feed
    /// reports one.
    pub fn record(&mut self, sample: &PriceSample) {
        self.adopt_name(sample);
        self.last_price = Some(sample.price);
        self.last_check_time = Some(sample.fetched_at);
    }
}
