use std::collections::BTreeMap;

use medscale_core::models::result::{EvaluationResult, FormattedScore, Interpretation, format_number};

/// Shown in a display slot whose value is absent.
pub const PLACEHOLDER: &str = "-";

/// The external display a session publishes results to.
pub trait ResultSink {
    fn publish(&mut self, scale_id: &str, score: &FormattedScore, interpretation: &Interpretation);
}

/// The four named display values for one scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlots {
    pub total: String,
    pub detail: String,
    pub risk: String,
    pub explanation: String,
}

impl Default for DisplaySlots {
    fn default() -> Self {
        Self {
            total: PLACEHOLDER.to_string(),
            detail: PLACEHOLDER.to_string(),
            risk: PLACEHOLDER.to_string(),
            explanation: PLACEHOLDER.to_string(),
        }
    }
}

impl DisplaySlots {
    pub fn new(score: &FormattedScore, interpretation: &Interpretation) -> Self {
        Self {
            total: slot(Some(&score.total)),
            detail: slot(Some(&score.detail)),
            risk: slot(interpretation.risk_label.as_deref()),
            explanation: slot(interpretation.explanation.as_deref()),
        }
    }

    pub fn from_result(result: &EvaluationResult) -> Self {
        Self::new(
            &FormattedScore::new(
                result.formatted_total.clone(),
                result.formatted_detail.clone(),
            ),
            &result.interpretation(),
        )
    }

    /// Plain-text rendering, one line per non-empty slot.
    ///
    /// The first line is `"{name}: {total}"`, with `"/{max}"` appended when
    /// the scale declares a maximum and the total does not already show one.
    pub fn export_text(&self, name: &str, max_score: Option<f64>) -> String {
        let mut lines = Vec::with_capacity(4);

        let mut first = format!("{name}: {}", self.total);
        if let Some(max) = max_score
            && self.total != PLACEHOLDER
            && !self.total.contains('/')
        {
            first.push_str(&format!("/{}", format_number(max)));
        }
        lines.push(first);

        for (label, value) in [
            ("Detail", &self.detail),
            ("Risk", &self.risk),
            ("Interpretation", &self.explanation),
        ] {
            if value != PLACEHOLDER {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines.join("\n")
    }
}

fn slot(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Keeps the latest published slots per scale.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    slots: BTreeMap<String, DisplaySlots>,
    published: usize,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self, scale_id: &str) -> Option<&DisplaySlots> {
        self.slots.get(scale_id)
    }

    /// Total number of publications received, across all scales.
    pub fn published(&self) -> usize {
        self.published
    }
}

impl ResultSink for MemoryDisplay {
    fn publish(&mut self, scale_id: &str, score: &FormattedScore, interpretation: &Interpretation) {
        self.slots
            .insert(scale_id.to_string(), DisplaySlots::new(score, interpretation));
        self.published += 1;
    }
}
