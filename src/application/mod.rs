//! Application layer - use cases and services

pub mod commands;
pub mod scheduler;
pub mod services;
pub mod shutdown;

pub use commands::Cli;
pub use scheduler::Scheduler;
pub use services::MonitorService;
pub use shutdown::install_shutdown_signal;
