//! medscale-engine
//!
//! The evaluation pipeline for declarative scales. On every answer change a
//! [`session::ScaleSession`] extracts values from its input surface, runs the
//! scale's formula, resolves the first matching interpretation rule,
//! publishes the result, and persists the raw answers.

pub mod display;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod replay;
pub mod resolve;
pub mod session;
pub mod surface;
pub mod workbench;
