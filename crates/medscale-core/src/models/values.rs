use std::collections::BTreeMap;

use serde::Serialize;

/// A chosen option as seen by a formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub value: String,
    pub weight: f64,
}

/// The value extracted for one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Single-choice section: the selected option, `None` when unanswered.
    Choice(Option<Selection>),
    /// Multi-select section: selected options in declaration order.
    Selections(Vec<Selection>),
    /// Freeform section: the raw text as entered, empty when absent.
    Raw(String),
}

impl FieldValue {
    /// Scalar contribution: the selected weight, the sum of selected
    /// weights, or `0` for unanswered and freeform values.
    pub fn weight(&self) -> f64 {
        match self {
            FieldValue::Choice(Some(selection)) => selection.weight,
            FieldValue::Choice(None) | FieldValue::Raw(_) => 0.0,
            FieldValue::Selections(selections) => selections.iter().map(|s| s.weight).sum(),
        }
    }

    pub fn weights(&self) -> Vec<f64> {
        match self {
            FieldValue::Choice(Some(selection)) => vec![selection.weight],
            FieldValue::Selections(selections) => selections.iter().map(|s| s.weight).collect(),
            FieldValue::Choice(None) | FieldValue::Raw(_) => Vec::new(),
        }
    }

    /// The selected option's value for a single-choice section.
    pub fn choice(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(Some(selection)) => Some(&selection.value),
            _ => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            FieldValue::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

/// Mapping from section id to the extracted value, rebuilt per evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValuesMap(BTreeMap<String, FieldValue>);

impl ValuesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, section_id: &str, value: FieldValue) {
        self.0.insert(section_id.to_string(), value);
    }

    pub fn get(&self, section_id: &str) -> Option<&FieldValue> {
        self.0.get(section_id)
    }

    /// Weight contributed by a section; missing sections contribute `0`.
    pub fn weight(&self, section_id: &str) -> f64 {
        self.get(section_id).map(FieldValue::weight).unwrap_or(0.0)
    }

    pub fn weights(&self, section_id: &str) -> Vec<f64> {
        self.get(section_id).map(FieldValue::weights).unwrap_or_default()
    }

    pub fn choice(&self, section_id: &str) -> Option<&str> {
        self.get(section_id).and_then(FieldValue::choice)
    }

    /// Raw freeform text; missing or non-freeform sections read as empty.
    pub fn raw(&self, section_id: &str) -> &str {
        self.get(section_id).and_then(FieldValue::raw).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
