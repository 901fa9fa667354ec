//! Integration test utilities for the forum server
//!
//! Spawns the real router over a TCP listener, backed by an in-memory store
//! the tests can inspect, and drives it with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
