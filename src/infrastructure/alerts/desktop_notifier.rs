//! macOS desktop notifications through `terminal-notifier`, speech through `say`

use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::domain::alert::{Notification, NotificationKind, Notifier};
use crate::shared::config::MonitorConfig;
use crate::shared::errors::AlertError;

const NOTIFICATION_GROUP: &str = "dTAO-monitor";

/// Desktop notifier. Only supported on macOS.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    supported: bool,
    sound: bool,
    speak: bool,
    url: Option<String>,
}

impl DesktopNotifier {
    pub fn from_config(config: &MonitorConfig) -> Self {
        let supported = cfg!(target_os = "macos");
        if config.notifications_on && !supported {
            warn!("System notifications are only supported on macOS");
        }
        Self {
            supported,
            sound: config.notification_sound,
            speak: config.notification_speak,
            url: config.notification_url.clone(),
        }
    }

    /// Arguments for `terminal-notifier`
    pub fn notifier_args(&self, notification: &Notification) -> Vec<String> {
        let mut args = vec![
            "-title".to_string(),
            notification.title.clone(),
            "-message".to_string(),
            notification.message(),
            "-group".to_string(),
            NOTIFICATION_GROUP.to_string(),
        ];
        if self.sound {
            args.push("-sound".to_string());
            args.push("default".to_string());
        }
        if let Some(url) = &self.url {
            args.push("-open".to_string());
            args.push(format!("{}{}", url, notification.subnet));
        }
        args
    }

    /// Sentence spoken by `say`
    pub fn speech_text(notification: &Notification) -> String {
        let direction = if notification.change > 0.0 { "up" } else { "down" };
        let subject = match notification.kind {
            NotificationKind::CycleAlert => notification.title.clone(),
            NotificationKind::BaselineAlarm => format!("Alarm, {}", notification.title),
        };
        format!("{} {} {:.1} percent", subject, direction, notification.change.abs())
    }
}

async fn run(command: &'static str, args: Vec<String>) -> Result<(), AlertError> {
    let status = Command::new(command)
        .args(&args)
        .status()
        .await
        .map_err(|source| AlertError::Launch { command, source })?;
    if !status.success() {
        return Err(AlertError::CommandFailed {
            command,
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

impl Notifier for DesktopNotifier {
    fn supported(&self) -> bool {
        self.supported
    }

    fn notify(&self, notification: Notification) {
        let args = self.notifier_args(&notification);
        let speech = self.speak.then(|| Self::speech_text(&notification));
        debug!("Sending notification {}", notification);

        tokio::spawn(async move {
            if let Err(e) = run("terminal-notifier", args).await {
                error!("Error sending notification: {}", e);
            }
            if let Some(text) = speech {
                if let Err(e) = run("say", vec![text]).await {
                    error!("Error speaking notification: {}", e);
                }
            }
        });
    }
}
