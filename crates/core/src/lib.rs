//! Domain types shared by every jobrelay crate.
//!
//! This crate has zero internal deps so it can be used by the store, the
//! notifier, the lifecycle engine, and the HTTP layer alike.

pub mod error;
pub mod job;
pub mod state_machine;
pub mod status;
pub mod types;
