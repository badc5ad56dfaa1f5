//! Background bulk-completion jobs.
//!
//! [`JobService`] accepts fire-and-forget enqueue requests over a bounded
//! queue; a fixed pool of long-lived consumer tasks executes them via
//! [`CompletionWorker`]. Once a request is accepted, no error ever reaches
//! the caller; failures are logged and dropped.

pub mod completion;
pub mod service;

pub use completion::CompletionWorker;
pub use service::{CompletionJob, JobService};
