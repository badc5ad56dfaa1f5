//! Shared domain types for the todo backend.
//!
//! This crate has no internal dependencies. It holds the primitive type
//! aliases, the domain error enum, the bulk-completion progress event, and
//! input validation helpers used by both the db and api layers.

pub mod completion;
pub mod error;
pub mod types;
pub mod validation;
