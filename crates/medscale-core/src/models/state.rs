use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Raw stored answer for one field: a selected option value or typed text,
/// or the list of toggled option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAnswer {
    One(String),
    Many(Vec<String>),
}

impl StoredAnswer {
    pub fn values(&self) -> Vec<&str> {
        match self {
            StoredAnswer::One(value) => vec![value.as_str()],
            StoredAnswer::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(StoredAnswer::One(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(StoredAnswer::Many),
            _ => None,
        }
    }
}

/// Raw answer state for one scale, keyed by field name. Never holds the
/// computed score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState(BTreeMap<String, StoredAnswer>);

/// Result of leniently parsing a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedState {
    pub state: PersistedState,
    /// Fields whose stored value had an unusable shape.
    pub skipped: Vec<String>,
}

impl PersistedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, answer: StoredAnswer) {
        self.0.insert(field.to_string(), answer);
    }

    pub fn get(&self, field: &str) -> Option<&StoredAnswer> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredAnswer)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored document field by field.
    ///
    /// A document that is not valid JSON, or not a JSON object, is an error.
    /// Individual entries of the wrong shape are skipped and reported.
    pub fn parse(raw: &str) -> Result<ParsedState, CoreError> {
        let json: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(entries) = json else {
            return Err(CoreError::MalformedState(
                "stored state is not a JSON object".to_string(),
            ));
        };

        let mut state = PersistedState::new();
        let mut skipped = Vec::new();
        for (field, value) in entries {
            match StoredAnswer::from_json(value) {
                Some(answer) => state.insert(&field, answer),
                None => skipped.push(field),
            }
        }
        Ok(ParsedState { state, skipped })
    }
}
