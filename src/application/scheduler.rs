//! Fixed-interval cycle scheduler

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::price::{CycleMonitor, SubnetOutcome};
use crate::domain::subnet::{AssetState, SubnetRegistry};
use crate::shared::types::SubnetId;

/// Drives [`CycleMonitor`] at a fixed interval.
///
/// Every cycle is a barrier: the next one starts only after all subnet tasks
/// of the current one have finished.
pub struct Scheduler {
    monitor: CycleMonitor,
    registry: SubnetRegistry,
    interval: Duration,
}

impl Scheduler {
    pub fn new(monitor: CycleMonitor, registry: SubnetRegistry, interval: Duration) -> Self {
        Self {
            monitor,
            registry,
            interval,
        }
    }

    pub fn registry(&self) -> &SubnetRegistry {
        &self.registry
    }

    /// Time left to wait after a cycle that took `elapsed`
    pub fn next_sleep(interval: Duration, elapsed: Duration) -> Duration {
        interval.saturating_sub(elapsed)
    }

    pub async fn run_once(&self, states: &mut HashMap<SubnetId, AssetState>) -> Vec<SubnetOutcome> {
        self.monitor.run_cycle(&self.registry, states).await
    }

    /// Run cycles until `shutdown` resolves. Returns the number of completed
    /// cycles.
    ///
    /// A shutdown that arrives mid-cycle takes effect once the cycle barrier
    /// is reached; one that arrives while sleeping ends the sleep.
    pub async fn run<F>(&self, states: &mut HashMap<SubnetId, AssetState>, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles: u64 = 0;

        loop {
            let start = Instant::now();
            let outcomes = self.run_once(states).await;
            cycles += 1;

            let elapsed = start.elapsed();
            let alerts = outcomes.iter().filter(|o| o.cycle.is_triggered()).count();
            let alarms = outcomes.iter().filter(|o| o.baseline.is_triggered()).count();
            let failed = outcomes.iter().filter(|o| !o.fetched).count();
            let sleep = Self::next_sleep(self.interval, elapsed);
            debug!(
                cycle = cycles,
                elapsed_ms = elapsed.as_millis() as u64,
                sleep_ms = sleep.as_millis() as u64,
                alerts,
                alarms,
                failed,
                "Cycle complete"
            );

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("🛑 Shutdown requested, stopping after {} cycles", cycles);
                    break;
                }
                _ = tokio::time::sleep(sleep) => {}
            }
        }

        cycles
    }
}
