//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `PriceFeed`: Raw price list retrieval
//! - `SwapSettlement`: Swap submission

pub mod price_feed;
pub mod settlement;
