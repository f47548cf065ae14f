//! Domain layer - Core quoting logic and models.
//!
//! Pure types and functions for the swap quote engine: assets, the
//! normalized price catalog, rate arithmetic, amount parsing and the
//! explicit quote state. Nothing here performs I/O.

pub mod amount;
pub mod asset;
pub mod catalog;
pub mod error;
pub mod quote_state;
pub mod rate;
pub mod swap;

// Re-export core types for convenience
pub use asset::{Asset, Symbol};
pub use catalog::{Catalog, PriceEntry};
pub use error::{FetchError, SelectionError, SubmitError};
pub use quote_state::{QuoteConditions, QuoteState};
pub use swap::{SwapConfirmation, SwapOrder};
