//! Swap order and confirmation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::Symbol;

/// A swap handed to settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapOrder {
    /// Client-side order identifier.
    pub id: Uuid,
    /// Amount exactly as the user typed it.
    pub amount_text: String,
    /// Parsed amount in source units.
    pub amount: f64,
    /// Asset being paid.
    pub source: Symbol,
    /// Asset being received.
    pub target: Symbol,
    /// Rate used for the quote.
    pub rate: f64,
    /// Quoted output in target units.
    pub output: f64,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Realized conversion reported back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapConfirmation {
    /// Settled order.
    pub order: SwapOrder,
    /// Output rounded to 4 decimals for display.
    pub output_rounded: String,
    /// Human-readable notification text.
    pub message: String,
    /// Settlement completion time.
    pub settled_at: DateTime<Utc>,
}

impl SwapConfirmation {
    /// Build the confirmation for a settled order.
    pub fn new(order: SwapOrder, settled_at: DateTime<Utc>) -> Self {
        let output_rounded = format!("{:.4}", order.output);
        let message = format!(
            "Successfully swapped {} {} to {} {}",
            order.amount_text, order.source, output_rounded, order.target
        );
        Self {
            order,
            output_rounded,
            message,
            settled_at,
        }
    }
}
