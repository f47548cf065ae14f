//! Engine error taxonomy.
//!
//! Soft failures (rejected keystrokes, validation warnings) are not
//! errors at all; they surface as return values and flags. The enums
//! here cover what a caller must branch on.

use thiserror::Error;

/// Message shown to the user when the price list cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch prices. Please try again later.";

/// The price feed was unreachable or returned something unusable.
///
/// Retryable: call `PriceCatalog::load` again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    /// User-facing text.
    pub message: String,
    /// Underlying cause, for logs.
    pub cause: String,
}

impl FetchError {
    /// Wrap a transport or decoding failure.
    pub fn from_cause(cause: &anyhow::Error) -> Self {
        Self {
            message: FETCH_FAILED_MESSAGE.to_string(),
            cause: format!("{cause:#}"),
        }
    }
}

/// A direct asset selection was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The symbol is not in the current catalog.
    #[error("Unknown token: {0}")]
    UnknownSymbol(String),

    /// The symbol is already selected on the other side.
    #[error("Cannot swap the same token: {0}")]
    SameAsCounterpart(String),

    /// No catalog has been loaded yet.
    #[error("Prices are not loaded")]
    NotLoaded,
}

/// Submission did not produce a confirmation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The quote is not valid for submission.
    #[error("Swap not ready: {0}")]
    NotReady(&'static str),

    /// The settlement call failed; the entered amount is kept.
    #[error("Swap failed: {0}")]
    Settlement(String),

    /// `complete_submit` was called with no submission in flight.
    #[error("No swap is being submitted")]
    NotSubmitting,
}
