//! medscale-core
//!
//! Pure domain types for declarative clinical scales: definitions, extracted
//! values, scores, persisted answer state, and evaluation results.
//! No I/O; this is the shared vocabulary of the medscale workspace.

pub mod error;
pub mod models;
pub mod store_keys;
