//! medscale-storage
//!
//! Flat string-keyed persistence for answer state. Backends implement
//! [`kv::KeyValueStore`]; [`state::StateStore`] layers per-scale answer
//! state on top of any backend.

pub mod error;
pub mod kv;
pub mod state;
