//! Cycle monitoring: one pass of fetch, compare and alert over all subnets

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::{CycleSettings, GuardedPriceSource, PriceAnalyzer, SubnetOutcome};
use crate::domain::alarm::BaselineAlarm;
use crate::domain::alert::{AlertSinks, Notification, NotificationKind, SoundCue};
use crate::domain::subnet::{AssetConfig, AssetState, SubnetRegistry};
use crate::shared::types::{AlertDecision, PriceSample, SubnetId};
use crate::shared::utils::{format_price_message, format_subnet_line};

/// Upper bound on concurrently running subnet tasks
pub const MAX_PARALLEL_FETCHES: usize = 10;

struct CycleContext {
    settings: CycleSettings,
    source: GuardedPriceSource,
    sinks: AlertSinks,
    alarm: Arc<BaselineAlarm>,
}

/// Runs polling cycles over the configured subnets
pub struct CycleMonitor {
    ctx: Arc<CycleContext>,
}

impl CycleMonitor {
    pub fn new(
        settings: CycleSettings,
        source: GuardedPriceSource,
        sinks: AlertSinks,
        alarm: Arc<BaselineAlarm>,
    ) -> Self {
        Self {
            ctx: Arc::new(CycleContext {
                settings,
                source,
                sinks,
                alarm,
            }),
        }
    }

    /// Worker pool size for a registry of `subnets` entries
    pub fn parallelism(subnets: usize) -> usize {
        subnets.clamp(1, MAX_PARALLEL_FETCHES)
    }

    /// Run one cycle and wait for every subnet task to finish.
    ///
    /// Each state is moved into its task and handed back on completion, so a
    /// state has exactly one writer during the cycle. A state whose task
    /// panicked is restored from its pre-cycle snapshot.
    pub async fn run_cycle(
        &self,
        registry: &SubnetRegistry,
        states: &mut HashMap<SubnetId, AssetState>,
    ) -> Vec<SubnetOutcome> {
        let limit = Self::parallelism(registry.len());
        let mut snapshots: HashMap<SubnetId, AssetState> = HashMap::with_capacity(registry.len());
        let mut outcomes: HashMap<SubnetId, SubnetOutcome> = HashMap::with_capacity(registry.len());
        let mut tasks = JoinSet::new();

        for asset in registry.iter() {
            while tasks.len() >= limit {
                if let Some(joined) = tasks.join_next().await {
                    Self::collect(joined, states, &mut outcomes);
                }
            }

            let state = states
                .remove(&asset.id)
                .unwrap_or_else(|| AssetState::new(asset.id));
            snapshots.insert(asset.id, state.clone());

            let ctx = Arc::clone(&self.ctx);
            let asset = asset.clone();
            tasks.spawn(async move { ctx.monitor_subnet(asset, state).await });
        }

        while let Some(joined) = tasks.join_next().await {
            Self::collect(joined, states, &mut outcomes);
        }

        for (id, snapshot) in snapshots {
            states.entry(id).or_insert(snapshot);
        }

        registry
            .iter()
            .map(|asset| {
                outcomes
                    .remove(&asset.id)
                    .unwrap_or_else(|| SubnetOutcome::skipped(asset.id))
            })
            .collect()
    }

    fn collect(
        joined: Result<(AssetState, SubnetOutcome), tokio::task::JoinError>,
        states: &mut HashMap<SubnetId, AssetState>,
        outcomes: &mut HashMap<SubnetId, SubnetOutcome>,
    ) {
        match joined {
            Ok((state, outcome)) => {
                outcomes.insert(outcome.subnet, outcome);
                states.insert(state.id, state);
            }
            Err(e) => error!("Subnet task failed: {}", e),
        }
    }
}

impl CycleContext {
    async fn monitor_subnet(&self, asset: AssetConfig, mut state: AssetState) -> (AssetState, SubnetOutcome) {
        let sample = match self.source.fetch(asset.id).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Error fetching subnet {} info: {}", asset.id, e);
                return (state, SubnetOutcome::skipped(asset.id));
            }
        };

        let change = PriceAnalyzer::calculate_price_change(state.last_price, sample.price);
        state.record(&sample);
        let label = state.label();
        let interval = self.settings.interval_secs;

        let cycle = match change {
            None => {
                let message = format_price_message(sample.price, None, interval, false);
                info!("{} (initial price)", format_subnet_line(&label, &message, false));
                AlertDecision::None
            }
            Some(change) => {
                let decision = PriceAnalyzer::evaluate(change, asset.threshold);
                if decision.is_triggered() {
                    let message = format_price_message(sample.price, Some(change), interval, true);
                    info!("{}", format_subnet_line(&label, &message, true));
                    self.dispatch_cycle_alert(&asset, &label, &sample, change);
                } else if !self.settings.log_threshold_only {
                    let message = format_price_message(sample.price, Some(change), interval, false);
                    info!("{}", format_subnet_line(&label, &message, false));
                }
                decision
            }
        };

        let baseline = self.alarm.check(&asset, &label, &sample);

        let outcome = SubnetOutcome {
            subnet: asset.id,
            fetched: true,
            cycle,
            baseline,
        };
        (state, outcome)
    }

    fn dispatch_cycle_alert(&self, asset: &AssetConfig, label: &str, sample: &PriceSample, change: f64) {
        let positive = change > 0.0;
        if !positive && self.settings.alerts_positive_only {
            debug!(
                "Skipping negative alert for {} (change: {:+.6}%, alerts_positive_only)",
                label, change
            );
            return;
        }

        self.sinks.play(SoundCue::cycle_alert(positive));
        self.sinks.notify(
            self.settings.notifications_on,
            Notification {
                kind: NotificationKind::CycleAlert,
                subnet: asset.id,
                title: label.to_string(),
                price: sample.price,
                change,
                threshold: asset.threshold,
            },
        );
    }
}
