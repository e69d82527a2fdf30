//! HTTP client for the lead discovery service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{LeadBatch, LeadQuery, LeadResponse, ServiceHealth};
use super::{GatewayError, LeadGateway};
use crate::config::GatewayConfig;
use crate::metrics::GATEWAY_REQUEST_DURATION;

/// Lead discovery service reached over HTTP.
pub struct HttpLeadGateway {
    client: Client,
    base_url: String,
    endpoint: String,
    health_path: String,
}

impl HttpLeadGateway {
    /// Create a new gateway. Every request is bounded by `timeout_secs`.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint: config.endpoint.clone(),
            health_path: config.health_path.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn exchange(&self, query: &str, source_count: u32) -> Result<LeadBatch, GatewayError> {
        let url = self.url(&self.endpoint);
        let body = LeadQuery {
            query: query.to_string(),
            num_links: source_count,
        };

        debug!(
            "Submitting lead query: url='{}', query='{}', sources={}",
            url, query, source_count
        );

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "unexpected status {}",
                status.as_u16()
            )));
        }

        let parsed: LeadResponse = response.json().await.map_err(|e| {
            GatewayError::Network(format!("Failed to parse lead response: {}", e))
        })?;

        Ok(parsed.into())
    }
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit_query(
        &self,
        query: &str,
        source_count: u32,
    ) -> Result<LeadBatch, GatewayError> {
        let start = Instant::now();
        let result = self.exchange(query, source_count).await;

        let label = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        GATEWAY_REQUEST_DURATION
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(batch) => debug!(
                "Lead query returned {} leads from {} sources",
                batch.leads.len(),
                batch.sources.len()
            ),
            Err(e) => warn!("Lead query failed: {}", e),
        }

        result
    }

    async fn health(&self) -> Result<ServiceHealth, GatewayError> {
        let url = self.url(&self.health_path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "health check returned status {}",
                status.as_u16()
            )));
        }

        response.json().await.map_err(|e| {
            GatewayError::Network(format!("Failed to parse health response: {}", e))
        })
    }
}
