//! Job lifecycle engine.
//!
//! Owns the `pending -> running -> completed | failed` state machine and the
//! deferred completion sequence started by a run request:
//!
//! - [`JobEngine`]: the operations callers use (submit, trigger, get,
//!   list, remove).
//! - [`CompletionTask`]: the fire-and-forget task that waits out the work
//!   duration, marks the job completed, and notifies the webhook receiver.
//! - [`JobStore`]: the persistence seam, with PostgreSQL and in-memory
//!   implementations.

pub mod completion;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod store;

pub use completion::{CompletionOutcome, CompletionTask};
pub use config::EngineConfig;
pub use error::{EngineError, StoreError};
pub use lifecycle::JobEngine;
pub use store::{JobStore, MemoryJobStore, PgJobStore};
