//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! quoting workflow.
//!
//! Use cases:
//! - `PriceCatalog`: Fetch and normalize the price list
//! - `QuoteSession`: Selection, amount entry, derived quote, submission
//! - `Debouncer`: Quiet-period delivery of typed input

pub mod debounce;
pub mod price_catalog;
pub mod quote_session;

pub use debounce::Debouncer;
pub use price_catalog::PriceCatalog;
pub use quote_session::{QuoteSession, QuoteView, Side};
