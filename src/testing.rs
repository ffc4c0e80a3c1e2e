//! In-memory fakes for the price source and alert sinks

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::alert::{Notification, Notifier, SoundAlerter, SoundCue};
use crate::domain::price::PriceSource;
use crate::shared::errors::PriceError;
use crate::shared::types::{PriceSample, SubnetId};

/// Counters shared between a [`FakePriceSource`] and the test
#[derive(Debug, Default)]
pub struct FetchProbe {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    started: Mutex<Vec<Instant>>,
}

impl FetchProbe {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Instants at which fetches started
    pub fn started(&self) -> Vec<Instant> {
        self.started.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

/// Scripted price source. `None` entries fail; the last entry repeats once
/// the script is exhausted.
pub struct FakePriceSource {
    scripts: HashMap<SubnetId, Vec<Option<f64>>>,
    cursors: HashMap<SubnetId, usize>,
    names: HashMap<SubnetId, String>,
    latency: Duration,
    probe: Arc<FetchProbe>,
}

impl FakePriceSource {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            cursors: HashMap::new(),
            names: HashMap::new(),
            latency: Duration::ZERO,
            probe: Arc::new(FetchProbe::default()),
        }
    }

    pub fn with_prices(self, subnet: SubnetId, prices: &[f64]) -> Self {
        self.with_script(subnet, prices.iter().copied().map(Some).collect())
    }

    pub fn with_script(mut self, subnet: SubnetId, script: Vec<Option<f64>>) -> Self {
        self.scripts.insert(subnet, script);
        self
    }

    pub fn with_name(mut self, subnet: SubnetId, name: &str) -> Self {
        self.names.insert(subnet, name.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn probe(&self) -> Arc<FetchProbe> {
        Arc::clone(&self.probe)
    }
}

#[async_trait]
impl PriceSource for FakePriceSource {
    async fn fetch(&mut self, subnet: SubnetId) -> Result<PriceSample, PriceError> {
        let probe = Arc::clone(&self.probe);
        probe.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut started) = probe.started.lock() {
            started.push(Instant::now());
        }
        let current = probe.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        probe.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = match self.scripts.get(&subnet) {
            None => Err(PriceError::NotFound(subnet)),
            Some(script) => {
                let cursor = self.cursors.entry(subnet).or_insert(0);
                let step = script.get(*cursor).or_else(|| script.last()).copied().flatten();
                *cursor += 1;
                match step {
                    Some(price) => Ok(PriceSample::new(subnet, price, self.names.get(&subnet).cloned())),
                    None => Err(PriceError::Network("scripted failure".to_string())),
                }
            }
        };

        probe.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Records every sound cue
#[derive(Default)]
pub struct RecordingSound {
    played: Mutex<Vec<SoundCue>>,
}

impl RecordingSound {
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl SoundAlerter for RecordingSound {
    fn play(&self, cue: SoundCue) {
        if let Ok(mut played) = self.played.lock() {
            played.push(cue);
        }
    }
}

/// Records every notification
pub struct RecordingNotifier {
    supported: bool,
    sent: Mutex<Vec<Notification>>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            supported: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingNotifier {
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn supported(&self) -> bool {
        self.supported
    }

    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

/// Sound sink whose `play` panics, for exercising task failure
#[derive(Default)]
pub struct PanickingSound;

impl SoundAlerter for PanickingSound {
    fn play(&self, cue: SoundCue) {
        panic!("sound sink failed on {:?}", cue);
    }
}

/// In-memory log sink for a thread-local `tracing` subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Route `tracing` output of the current thread into this buffer until
    /// the guard is dropped
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
