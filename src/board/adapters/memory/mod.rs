//! In-memory adapters for board synchronisation.

mod gateway;

pub use gateway::{GatewayOperation, InMemoryTaskGateway};
