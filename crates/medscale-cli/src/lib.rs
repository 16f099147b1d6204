//! medscale-cli library root.
//!
//! Re-exports the configuration and command modules so that integration
//! tests can exercise them without spawning the binary.

pub mod commands;
pub mod config;
