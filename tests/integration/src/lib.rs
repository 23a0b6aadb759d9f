//! Integration test utilities for the TeamHub API
//!
//! Spawns the real server (PostgreSQL + Redis) and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
