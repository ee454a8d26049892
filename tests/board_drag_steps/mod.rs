//! Step definitions for board drag scenarios.

pub mod then;
pub mod when;
pub mod world;
