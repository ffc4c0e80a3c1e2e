//! HTTP price feed client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::price::PriceSource;
use crate::shared::errors::PriceError;
use crate::shared::types::{PriceSample, SubnetId};

/// Response of `GET {endpoint}/subnets/{netuid}`
#[derive(Debug, Deserialize)]
struct SubnetPriceResponse {
    netuid: SubnetId,
    #[serde(default)]
    subnet_name: Option<String>,
    price: f64,
}

/// Price source backed by a REST subnet price feed
pub struct HttpPriceSource {
    http_client: Client,
    endpoint: String,
    network: String,
}

impl HttpPriceSource {
    pub fn new(endpoint: &str, network: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            network: network.to_string(),
        }
    }

    fn subnet_url(&self, subnet: SubnetId) -> String {
        format!("{}/subnets/{}", self.endpoint, subnet)
    }

    fn into_sample(subnet: SubnetId, body: SubnetPriceResponse) -> Result<PriceSample, PriceError> {
        if body.netuid != subnet {
            return Err(PriceError::InvalidData(format!(
                "requested subnet {} but feed answered for {}",
                subnet, body.netuid
            )));
        }
        if !body.price.is_finite() || body.price < 0.0 {
            return Err(PriceError::InvalidData(format!("price {} for subnet {}", body.price, subnet)));
        }
        let name = body.subnet_name.filter(|n| !n.trim().is_empty());
        Ok(PriceSample::new(subnet, body.price, name))
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch(&mut self, subnet: SubnetId) -> Result<PriceSample, PriceError> {
        let url = self.subnet_url(subnet);
        debug!("Fetching subnet {} price from {}", subnet, url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("network", self.network.as_str())])
            .send()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(PriceError::NotFound(subnet)),
            status if !status.is_success() => return Err(PriceError::Http(status.as_u16())),
            _ => {}
        }

        let body: SubnetPriceResponse = response
            .json()
            .await
            .map_err(|e| PriceError::InvalidData(e.to_string()))?;
        Self::into_sample(subnet, body)
    }
}
