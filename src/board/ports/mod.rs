//! Port contracts for board synchronisation.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{GatewayError, GatewayResult, TaskGateway};
