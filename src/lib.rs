//! dtao-monitor - subnet price monitor
//! Cycle-over-cycle alerts and baseline drift alarms

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use application::{MonitorService, Scheduler};
pub use domain::alarm::BaselineAlarm;
pub use domain::price::{CycleMonitor, GuardedPriceSource, PriceSource};
pub use domain::subnet::SubnetRegistry;
