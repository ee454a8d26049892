//! Adapter implementations for board synchronisation ports.

pub mod http;
pub mod memory;
