//! Outbound job-completion notifications.
//!
//! - [`CompletionNotifier`]: the seam the lifecycle engine calls once a
//!   job has been marked completed.
//! - [`JobCompletedPayload`]: the JSON body sent to the receiver.
//! - [`WebhookDelivery`]: HTTP POST implementation backed by `reqwest`.

pub mod delivery;

pub use delivery::webhook::{WebhookDelivery, WebhookError};
pub use delivery::{CompletionNotifier, JobCompletedPayload};
