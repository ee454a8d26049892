//! HTTP adapter for the remote task service.

mod client;
mod wire;

pub use client::HttpTaskGateway;
