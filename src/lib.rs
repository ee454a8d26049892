//! Boardsync: client-side board state synchronisation for a remote task
//! service.
//!
//! This crate provides the engine behind a kanban task board: the canonical
//! task collection of a board view, its projection into ordered status
//! columns, drag-and-drop moves with optimistic updates and rollback, task
//! form submission, free-text filtering, and the gateway to the remote
//! task service.
//!
//! # Architecture
//!
//! Boardsync follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Task records, columns, store, sync, and drag handling
//! - [`config`]: Connection settings for the remote task service

pub mod board;
pub mod config;
