//! Board state synchronisation.
//!
//! Owns the in-memory task collection of one board view, projects it into
//! status columns, applies local edits and drag moves, and reconciles them
//! with the remote task service. The module follows hexagonal architecture:
//!
//! - Domain types and pure projections in [`domain`]
//! - The remote service contract in [`ports`]
//! - HTTP and in-memory gateways in [`adapters`]
//! - Store, sync, drag, and form orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
