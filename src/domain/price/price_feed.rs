//! Price feed interface and the lock that serializes access to it

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::shared::errors::PriceError;
use crate::shared::types::{PriceSample, SubnetId};

/// Upstream price feed. Not safe for concurrent use, hence `&mut self`.
#[async_trait]
pub trait PriceSource: Send {
    async fn fetch(&mut self, subnet: SubnetId) -> Result<PriceSample, PriceError>;
}

/// Shared handle to a [`PriceSource`].
///
/// Every fetch takes the process-wide lock and releases it as soon as the
/// call returns. Each call is bounded by `timeout`.
#[derive(Clone)]
pub struct GuardedPriceSource {
    inner: Arc<Mutex<Box<dyn PriceSource>>>,
    timeout: Duration,
}

impl GuardedPriceSource {
    pub fn new(source: Box<dyn PriceSource>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
            timeout,
        }
    }

    pub async fn fetch(&self, subnet: SubnetId) -> Result<PriceSample, PriceError> {
        let mut source = self.inner.lock().await;
        match tokio::time::timeout(self.timeout, source.fetch(subnet)).await {
            Ok(result) => result,
            Err(_) => Err(PriceError::Timeout(self.timeout.as_secs())),
        }
    }
}
