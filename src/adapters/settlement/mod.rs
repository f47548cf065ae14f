//! Settlement Adapters
//!
//! - `SimulatedSettlement`: fixed-latency mock of a swap venue

pub mod simulated;

pub use simulated::SimulatedSettlement;
