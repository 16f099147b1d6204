use std::collections::BTreeSet;

use serde::Serialize;

/// Auxiliary classifications a formula derives alongside its number,
/// passed explicitly to interpretation predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreFlags(BTreeSet<String>);

impl ScoreFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, flag: &str) {
        self.0.insert(flag.to_string());
    }

    /// Raise `flag` when `condition` holds.
    pub fn raise_if(&mut self, flag: &str, condition: bool) {
        if condition {
            self.raise(flag);
        }
    }

    pub fn is_raised(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of a score formula: the number rules are evaluated against,
/// plus any derived flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub value: f64,
    pub flags: ScoreFlags,
}

impl Score {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            flags: ScoreFlags::new(),
        }
    }

    pub fn flagged(value: f64, flags: ScoreFlags) -> Self {
        Self { value, flags }
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
