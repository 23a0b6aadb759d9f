//! Route handlers
//!
//! HTTP request handlers organized by resource.

pub mod events;
pub mod health;
pub mod join_requests;
pub mod members;
pub mod teams;
