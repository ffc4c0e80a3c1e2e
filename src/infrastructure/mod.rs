//! Infrastructure layer - price feed client, sound, notifications and host helpers

pub mod alerts;
pub mod feed;
pub mod system;

pub use alerts::{AfplaySoundAlerter, DesktopNotifier};
pub use feed::HttpPriceSource;
pub use system::KeepAwake;
