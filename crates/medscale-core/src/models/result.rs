use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::score::Score;

/// Displayable total and optional breakdown for a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormattedScore {
    pub total: String,
    pub detail: String,
}

impl FormattedScore {
    pub fn new(total: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            total: total.into(),
            detail: detail.into(),
        }
    }

    /// The default rendering: the bare score and no detail.
    pub fn from_score(score: &Score) -> Self {
        Self::new(format_number(score.value), "")
    }
}

/// Risk label and explanation chosen by the first matching rule. Both are
/// `None` when no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub risk_label: Option<String>,
    pub explanation: Option<String>,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.risk_label.is_none() && self.explanation.is_none()
    }
}

/// Everything one evaluation produces. Recomputed on every change and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationResult {
    pub scale_id: String,
    pub score: f64,
    pub flags: Vec<String>,
    pub formatted_total: String,
    pub formatted_detail: String,
    pub risk_label: Option<String>,
    pub explanation: Option<String>,
}

impl EvaluationResult {
    pub fn interpretation(&self) -> Interpretation {
        Interpretation {
            risk_label: self.risk_label.clone(),
            explanation: self.explanation.clone(),
        }
    }
}

/// Integral values print without a fractional part; others use the
/// shortest representation that round-trips.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
