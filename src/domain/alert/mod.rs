//! Alert domain - sound and notification sinks

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::shared::types::{Direction, Price, SubnetId};

/// Which sound to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    AlertPositive,
    AlertNegative,
    AlarmPositive,
    AlarmNegative,
}

impl SoundCue {
    pub fn cycle_alert(positive: bool) -> Self {
        if positive {
            SoundCue::AlertPositive
        } else {
            SoundCue::AlertNegative
        }
    }

    pub fn alarm(direction: Direction) -> Self {
        match direction {
            Direction::Up => SoundCue::AlarmPositive,
            Direction::Down => SoundCue::AlarmNegative,
        }
    }
}

/// What kind of threshold produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    CycleAlert,
    BaselineAlarm,
}

/// Notification payload
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub subnet: SubnetId,
    pub title: String,
    pub price: Price,
    /// Signed percent change
    pub change: f64,
    pub threshold: f64,
}

impl Notification {
    pub fn message(&self) -> String {
        let prefix = match self.kind {
            NotificationKind::CycleAlert => "",
            NotificationKind::BaselineAlarm => "ALARM ",
        };
        format!(
            "{}{:+.6}% (TH: {}%)\n{}",
            prefix, self.change, self.threshold, self.price
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message().replace('\n', " "))
    }
}

/// Plays alert sounds. Implementations must return immediately and handle
/// their own failures.
pub trait SoundAlerter: Send + Sync {
    fn play(&self, cue: SoundCue);
}

/// Delivers OS notifications. Implementations must return immediately and
/// handle their own failures.
pub trait Notifier: Send + Sync {
    /// Whether notifications can be delivered on this host
    fn supported(&self) -> bool;

    fn notify(&self, notification: Notification);
}

/// Sound and notification sinks shared by the cycle monitor and the alarm
#[derive(Clone)]
pub struct AlertSinks {
    sound: Arc<dyn SoundAlerter>,
    notifier: Arc<dyn Notifier>,
}

impl AlertSinks {
    pub fn new(sound: Arc<dyn SoundAlerter>, notifier: Arc<dyn Notifier>) -> Self {
        Self { sound, notifier }
    }

    pub fn play(&self, cue: SoundCue) {
        self.sound.play(cue);
    }

    /// Send a notification when enabled and supported by the host
    pub fn notify(&self, enabled: bool, notification: Notification) {
        if !enabled {
            return;
        }
        if !self.notifier.supported() {
            debug!("Notifications not supported on this platform");
            return;
        }
        self.notifier.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNotifier, RecordingSound};

    fn notification() -> Notification {
        Notification {
            kind: NotificationKind::CycleAlert,
            subnet: 3,
            title: "3 (templar)".to_string(),
            price: Price::new(0.05),
            change: 4.25,
            threshold: 3.0,
        }
    }

    #[test]
    fn test_notification_message() {
        assert_eq!(notification().message(), "+4.250000% (TH: 3%)\nτ0.050000");
    }

    #[test]
    fn test_unsupported_notifier_is_skipped() {
        let notifier = Arc::new(RecordingNotifier::unsupported());
        let sinks = AlertSinks::new(Arc::new(RecordingSound::default()), notifier.clone());
        sinks.notify(true, notification());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_disabled_notifications_are_skipped() {
        let notifier = Arc::new(RecordingNotifier::default());
        let sinks = AlertSinks::new(Arc::new(RecordingSound::default()), notifier.clone());
        sinks.notify(false, notification());
        assert!(notifier.sent().is_empty());
        sinks.notify(true, notification());
        assert_eq!(notifier.sent().len(), 1);
    }
}
