//! Registry of configured subnets

use std::collections::HashMap;

use super::{AssetConfig, AssetState};
use crate::shared::config::MonitorConfig;
use crate::shared::types::SubnetId;

/// Immutable list of monitored subnets, in configuration order
#[derive(Debug, Clone, Default)]
pub struct SubnetRegistry {
    subnets: Vec<AssetConfig>,
}

impl SubnetRegistry {
    pub fn new(subnets: Vec<AssetConfig>) -> Self {
        Self { subnets }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        let subnets = config
            .subnets
            .iter()
            .map(|entry| AssetConfig::new(entry.netuid, config.threshold_for(entry)))
            .collect();
        Self { subnets }
    }

    pub fn get(&self, id: SubnetId) -> Option<&AssetConfig> {
        self.subnets.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetConfig> {
        self.subnets.iter()
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    /// Fresh state for every configured subnet
    pub fn initial_states(&self) -> HashMap<SubnetId, AssetState> {
        self.subnets
            .iter()
            .map(|s| (s.id, AssetState::new(s.id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ConfigLoader;

    #[test]
    fn test_registry_from_config() {
        let config = ConfigLoader::from_toml(
            r#"
            network = "test"
            interval = 12
            threshold = 2.5
            alert_positive = "up.mp3"
            alert_negative = "down.mp3"
            subnets = [{ netuid = 8 }, { netuid = 64, threshold = 7.0 }]
            "#,
        )
        .unwrap();

        let registry = SubnetRegistry::from_config(&config);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(8).unwrap().threshold, 2.5);
        assert_eq!(registry.get(64).unwrap().threshold, 7.0);
        assert!(registry.get(1).is_none());

        let states = registry.initial_states();
        assert_eq!(states.len(), 2);
        assert!(states.values().all(|s| s.last_price.is_none()));
    }
}
