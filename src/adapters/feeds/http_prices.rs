//! HTTP Price Feed - JSON Price List over HTTPS
//!
//! Fetches the published price list with a single GET. No auth,
//! no pagination, no retry: a failed fetch is reported to the caller,
//! which decides whether to reload.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::FeedConfig;
use crate::ports::price_feed::{PriceEntry, PriceFeed};

/// Price list client backed by reqwest.
pub struct HttpPriceFeed {
    /// Underlying HTTP client.
    http: Client,
    /// Price list URL.
    url: String,
}

impl HttpPriceFeed {
    /// Create a feed client from configuration.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(1)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// The endpoint this feed reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_prices(&self) -> Result<Vec<PriceEntry>> {
        let started = Instant::now();

        let response = self
            .http
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Price feed request failed")?;

        match response.status() {
            StatusCode::OK => {}
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, "Price feed answered with an error status");
                return Err(anyhow::anyhow!("Price feed error {status}: {body}"));
            }
        }

        let entries: Vec<PriceEntry> = response
            .json()
            .await
            .context("Price feed returned malformed JSON")?;

        debug!(
            entries = entries.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Price list fetched"
        );

        Ok(entries)
    }
}
