//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `feeds`: HTTP price list client
//! - `settlement`: Simulated swap execution

pub mod feeds;
pub mod settlement;
