//! Sound and notification backends

pub mod afplay;
pub mod desktop_notifier;

pub use afplay::AfplaySoundAlerter;
pub use desktop_notifier::DesktopNotifier;
