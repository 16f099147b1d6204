//! Persistent store key conventions.
//!
//! Pure string functions. These define the canonical layout of entries in
//! the flat key-value store shared by every scale session.

/// Suffix appended to a scale id to form its answer-state key.
pub const SCALE_STATE_SUFFIX: &str = "State";

/// Key holding the id of the scale that was last made active.
pub const ACTIVE_SCALE: &str = "activeScale";

pub fn scale_state(scale_id: &str) -> String {
    format!("{scale_id}{SCALE_STATE_SUFFIX}")
}
