//! Simulated Settlement - Latency-only Swap Execution
//!
//! Stands in for a real venue: waits for the configured latency and
//! acknowledges every order. Never fails.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

use crate::config::SettlementConfig;
use crate::domain::swap::SwapOrder;
use crate::ports::settlement::{SettlementReceipt, SwapSettlement};

/// Settlement adapter that only sleeps.
#[derive(Debug, Clone)]
pub struct SimulatedSettlement {
    /// Artificial round-trip time.
    latency: Duration,
}

impl SimulatedSettlement {
    /// Create with an explicit latency.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Create from configuration.
    pub fn from_config(config: &SettlementConfig) -> Self {
        Self::new(Duration::from_millis(config.latency_ms))
    }
}

#[async_trait]
impl SwapSettlement for SimulatedSettlement {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn settle(&self, order: &SwapOrder) -> Result<SettlementReceipt> {
        tokio::time::sleep(self.latency).await;

        info!(
            source = %order.source,
            target = %order.target,
            amount = order.amount,
            output = order.output,
            "Simulated settlement complete"
        );

        Ok(SettlementReceipt {
            reference: format!("sim-{}", order.id.simple()),
            settled_at: Utc::now(),
        })
    }
}
