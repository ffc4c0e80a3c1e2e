//! Sound playback through `afplay`

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::domain::alert::{SoundAlerter, SoundCue};
use crate::shared::config::MonitorConfig;
use crate::shared::errors::AlertError;

/// Plays alert and alarm sounds on a background task
#[derive(Debug, Clone)]
pub struct AfplaySoundAlerter {
    alerts_on: bool,
    alert_positive: PathBuf,
    alert_negative: PathBuf,
    alert_volume: f64,
    alarm_positive: Option<PathBuf>,
    alarm_negative: Option<PathBuf>,
    alarm_volume: f64,
}

impl AfplaySoundAlerter {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            alerts_on: config.alerts_on,
            alert_positive: config.alert_positive.clone(),
            alert_negative: config.alert_negative.clone(),
            alert_volume: config.alert_volume,
            alarm_positive: config.alarm_sound_positive.clone(),
            alarm_negative: config.alarm_sound_negative.clone(),
            alarm_volume: config.alarm_volume,
        }
    }

    /// Warn about configured sound files that do not exist
    pub fn check_sound_files(&self) {
        if !self.alert_positive.exists() || !self.alert_negative.exists() {
            warn!("Alert sound files not found. Sound alerts will fall back to the terminal bell.");
        }
        for path in [&self.alarm_positive, &self.alarm_negative].into_iter().flatten() {
            if !path.exists() {
                warn!("Alarm sound file not found: {}", path.display());
            }
        }
    }

    /// File and volume for a cue, `None` when the cue is switched off
    pub fn sound_for(&self, cue: SoundCue) -> Option<(&Path, f64)> {
        match cue {
            SoundCue::AlertPositive | SoundCue::AlertNegative if !self.alerts_on => None,
            SoundCue::AlertPositive => Some((self.alert_positive.as_path(), self.alert_volume)),
            SoundCue::AlertNegative => Some((self.alert_negative.as_path(), self.alert_volume)),
            SoundCue::AlarmPositive => self.alarm_positive.as_deref().map(|p| (p, self.alarm_volume)),
            SoundCue::AlarmNegative => self.alarm_negative.as_deref().map(|p| (p, self.alarm_volume)),
        }
    }
}

/// Terminal bell, flushed so it sounds without waiting for a newline
fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

async fn play_file(path: PathBuf, volume: f64) -> Result<(), AlertError> {
    if !path.exists() {
        if let Err(e) = ring_bell(&mut io::stdout()) {
            debug!("Could not ring terminal bell: {}", e);
        }
        return Err(AlertError::SoundFileMissing(path.display().to_string()));
    }

    let status = Command::new("afplay")
        .arg("-v")
        .arg(volume.to_string())
        .arg(&path)
        .status()
        .await
        .map_err(|source| AlertError::Launch { command: "afplay", source })?;

    if !status.success() {
        return Err(AlertError::CommandFailed {
            command: "afplay",
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

impl SoundAlerter for AfplaySoundAlerter {
    fn play(&self, cue: SoundCue) {
        let Some((path, volume)) = self.sound_for(cue) else {
            debug!("Sound for {:?} is disabled", cue);
            return;
        };
        let path = path.to_path_buf();
        tokio::spawn(async move {
            if let Err(e) = play_file(path, volume).await {
                error!("Error playing sound {:?}: {}", cue, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ConfigLoader;

    fn alerter(extra: &str) -> AfplaySoundAlerter {
        let content = format!(
            r#"
            network = "test"
            interval = 60
            threshold = 3.0
            alert_positive = "up.mp3"
            alert_negative = "down.mp3"
            alert_volume = 0.25
            {}
            subnets = [{{ netuid = 1 }}]
            "#,
            extra
        );
        AfplaySoundAlerter::from_config(&ConfigLoader::from_toml(&content).unwrap())
    }

    #[test]
    fn test_cycle_alert_sounds() {
        let alerter = alerter("");
        assert_eq!(alerter.sound_for(SoundCue::AlertPositive), Some((Path::new("up.mp3"), 0.25)));
        assert_eq!(alerter.sound_for(SoundCue::AlertNegative), Some((Path::new("down.mp3"), 0.25)));
        assert_eq!(alerter.sound_for(SoundCue::AlarmNegative), None);
    }

    #[test]
    fn test_alerts_off_keeps_alarms() {
        let alerter = alerter(
            r#"alerts_on = false
            alarm_enabled = true
            alarm_volume = 0.8
            alarm_sound_positive = "alarm-up.mp3"
            alarm_sound_negative = "alarm-down.mp3""#,
        );
        assert_eq!(alerter.sound_for(SoundCue::AlertPositive), None);
        assert_eq!(
            alerter.sound_for(SoundCue::AlarmPositive),
            Some((Path::new("alarm-up.mp3"), 0.8))
        );
        assert_eq!(
            alerter.sound_for(SoundCue::AlarmNegative),
            Some((Path::new("alarm-down.mp3"), 0.8))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let result = play_file(PathBuf::from("/nonexistent/alert.mp3"), 0.5).await;
        assert!(matches!(result, Err(AlertError::SoundFileMissing(_))));
    }

    #[derive(Default)]
    struct FlushTracker {
        written: Vec<u8>,
        flushed: usize,
    }

    impl Write for FlushTracker {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed = self.written.len();
            Ok(())
        }
    }

    #[test]
    fn test_bell_is_flushed() {
        let mut out = FlushTracker::default();
        ring_bell(&mut out).unwrap();
        assert_eq!(out.written, b"\x07");
        assert_eq!(out.flushed, 1);
    }
}
