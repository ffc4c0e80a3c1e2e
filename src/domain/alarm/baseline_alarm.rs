//! Baseline price alarm

use futures::future::join_all;
use std::collections::HashMap;
use tracing::{info, warn};

use super::AlarmSettings;
use crate::domain::alert::{AlertSinks, Notification, NotificationKind, SoundCue};
use crate::domain::price::GuardedPriceSource;
use crate::domain::subnet::{AssetConfig, AssetState, SubnetRegistry};
use crate::shared::types::{AlertDecision, Direction, Price, PriceSample, SubnetId};
use crate::shared::utils::calculate_percentage_change;

/// Compares every sample against the price captured once at startup.
///
/// Baselines are never reset and no "already fired" flag is kept, so the
/// alarm fires on every cycle in which the deviation persists.
pub struct BaselineAlarm {
    settings: AlarmSettings,
    baselines: HashMap<SubnetId, Price>,
    sinks: AlertSinks,
}

impl BaselineAlarm {
    pub fn new(settings: AlarmSettings, baselines: HashMap<SubnetId, Price>, sinks: AlertSinks) -> Self {
        Self {
            settings,
            baselines,
            sinks,
        }
    }

    /// Capture the baseline of every subnet through the shared price source.
    ///
    /// Subnets whose fetch fails stay without a baseline for the whole run.
    /// Names reported by the baseline samples are adopted into `states`.
    pub async fn initialize(
        settings: AlarmSettings,
        source: &GuardedPriceSource,
        registry: &SubnetRegistry,
        sinks: AlertSinks,
        states: &mut HashMap<SubnetId, AssetState>,
    ) -> Self {
        if !settings.enabled {
            return Self::new(settings, HashMap::new(), sinks);
        }

        info!("Initializing price alarm with current subnet prices...");
        let fetches = registry
            .iter()
            .map(|asset| async move { (asset.id, source.fetch(asset.id).await) });

        let mut baselines = HashMap::new();
        for (id, result) in join_all(fetches).await {
            match result {
                Ok(sample) => {
                    let state = states.entry(id).or_insert_with(|| AssetState::new(id));
                    state.adopt_name(&sample);
                    info!("Initial price for {}: {}", state.label(), sample.price);
                    baselines.insert(id, sample.price);
                }
                Err(e) => {
                    warn!("Could not initialize price for subnet {}: {}", id, e);
                }
            }
        }

        Self::new(settings, baselines, sinks)
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn baseline(&self, subnet: SubnetId) -> Option<Price> {
        self.baselines.get(&subnet).copied()
    }

    /// Decision for a price without dispatching anything
    pub fn evaluate(&self, subnet: SubnetId, price: Price) -> AlertDecision {
        if !self.settings.enabled {
            return AlertDecision::None;
        }
        let Some(baseline) = self.baseline(subnet) else {
            return AlertDecision::None;
        };
        let Some(change) = calculate_percentage_change(baseline.value, price.value) else {
            return AlertDecision::None;
        };

        let threshold = self.settings.threshold;
        if change <= -threshold {
            AlertDecision::BaselineThresholdCrossed {
                direction: Direction::Down,
                magnitude: change,
            }
        } else if !self.settings.negative_only && change >= threshold {
            AlertDecision::BaselineThresholdCrossed {
                direction: Direction::Up,
                magnitude: change,
            }
        } else {
            AlertDecision::None
        }
    }

    /// Check an already fetched sample and raise the alarm if needed
    pub fn check(&self, asset: &AssetConfig, label: &str, sample: &PriceSample) -> AlertDecision {
        let decision = self.evaluate(asset.id, sample.price);
        if let AlertDecision::BaselineThresholdCrossed { direction, magnitude } = decision {
            let baseline = self.baseline(asset.id).unwrap_or(sample.price);
            warn!(
                "ALARM: {} price moved {:+.2}% from initial price!",
                label, magnitude
            );
            warn!("Initial: {} | Current: {}", baseline, sample.price);
            self.trigger(asset, label, sample, direction, magnitude);
        }
        decision
    }

    fn trigger(&self, asset: &AssetConfig, label: &str, sample: &PriceSample, direction: Direction, change: f64) {
        self.sinks.notify(
            self.settings.notifications_on,
            Notification {
                kind: NotificationKind::BaselineAlarm,
                subnet: asset.id,
                title: label.to_string(),
                price: sample.price,
                change,
                threshold: self.settings.threshold,
            },
        );
        self.sinks.play(SoundCue::alarm(direction));
    }
}
