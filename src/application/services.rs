//! Application services

use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::scheduler::Scheduler;
use crate::domain::alarm::BaselineAlarm;
use crate::domain::alert::{AlertSinks, Notifier, SoundAlerter};
use crate::domain::price::{CycleMonitor, GuardedPriceSource, PriceSource, SubnetOutcome};
use crate::domain::subnet::{AssetState, SubnetRegistry};
use crate::shared::config::MonitorConfig;
use crate::shared::types::SubnetId;

/// Wires the price source, alarm, monitor and scheduler together
pub struct MonitorService {
    config: MonitorConfig,
    scheduler: Scheduler,
    states: HashMap<SubnetId, AssetState>,
}

impl MonitorService {
    /// Build the service. Captures alarm baselines when the alarm is enabled
    /// and resolves subnet names for the startup banner.
    pub async fn build(
        config: MonitorConfig,
        source: Box<dyn PriceSource>,
        sound: Arc<dyn SoundAlerter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let registry = SubnetRegistry::from_config(&config);
        let source = GuardedPriceSource::new(source, Duration::from_secs(config.fetch_timeout_secs));
        let sinks = AlertSinks::new(sound, notifier);

        let mut states = registry.initial_states();
        let alarm_settings = config.alarm_settings();
        if !alarm_settings.enabled {
            load_subnet_names(&source, &registry, &mut states).await;
        }
        let alarm = BaselineAlarm::initialize(alarm_settings, &source, &registry, sinks.clone(), &mut states).await;
        let monitor = CycleMonitor::new(config.cycle_settings(), source, sinks, Arc::new(alarm));

        let scheduler = Scheduler::new(monitor, registry, Duration::from_secs(config.interval));
        Self {
            config,
            scheduler,
            states,
        }
    }

    pub fn states(&self) -> &HashMap<SubnetId, AssetState> {
        &self.states
    }

    /// Log the monitor configuration banner
    pub fn log_configuration(&self) {
        let config = &self.config;
        info!("=== TAO Price Monitor Configuration ===");
        info!("Network:       {}", config.network);
        info!("Endpoint:      {}", config.endpoint);
        info!(
            "Interval:      {} seconds ({:.1} minutes)",
            config.interval,
            config.interval as f64 / 60.0
        );
        info!("Alerts:        {}", enabled(config.alerts_on));
        info!("Alert Volume:  {}%", config.alert_volume * 100.0);
        info!("Notifications: {}", enabled(config.notifications_on));
        if config.alarm_enabled {
            info!(
                "Alarm:         Enabled ({}%{})",
                config.alarm_threshold,
                if config.alarm_negative_only { ", drops only" } else { "" }
            );
        } else {
            info!("Alarm:         Disabled");
        }
        info!("Monitored Subnets:");
        for subnet in self.scheduler.registry().iter() {
            let label = self
                .states
                .get(&subnet.id)
                .map(|s| s.label())
                .unwrap_or_else(|| format!("Subnet {}", subnet.id));
            info!("  {:<30} {}%", label, subnet.threshold);
        }
        info!("=======================================");
    }

    pub async fn run_once(&mut self) -> Vec<SubnetOutcome> {
        self.scheduler.run_once(&mut self.states).await
    }

    /// Run until `shutdown` resolves
    pub async fn run<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        info!("🚀 Starting price monitor for {} subnets", self.scheduler.registry().len());
        let cycles = self.scheduler.run(&mut self.states, shutdown).await;
        info!("✅ Monitor stopped after {} cycles", cycles);
        cycles
    }
}

/// Fetch every subnet once so the banner can show its name. Prices are not
/// recorded; the first cycle still reports them as initial prices.
async fn load_subnet_names(
    source: &GuardedPriceSource,
    registry: &SubnetRegistry,
    states: &mut HashMap<SubnetId, AssetState>,
) {
    let fetches = registry
        .iter()
        .map(|asset| async move { (asset.id, source.fetch(asset.id).await) });

    for (id, result) in join_all(fetches).await {
        match result {
            Ok(sample) => {
                if let Some(state) = states.get_mut(&id) {
                    state.adopt_name(&sample);
                }
            }
            Err(e) => debug!("Could not resolve name of subnet {}: {}", id, e),
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}
