//! Unit tests for the board module.
//!
//! Tests are organised by component: the status codec and payload mapping,
//! column projection and filtering, the store, and the services built on it.
