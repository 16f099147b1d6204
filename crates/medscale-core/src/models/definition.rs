use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::result::FormattedScore;
use super::score::{Score, ScoreFlags};
use super::values::ValuesMap;

/// Computes a score from extracted values. Must be deterministic and must
/// normalize any parse failure to a documented default before arithmetic.
pub type ScoreFormula = fn(&ValuesMap) -> Score;

/// Re-derives a human-readable breakdown from the same values and score.
pub type ResultFormatter = fn(&ValuesMap, &Score) -> FormattedScore;

/// Predicate over the numeric score and the flags the formula raised.
pub type RulePredicate = fn(f64, &ScoreFlags) -> bool;

/// How answers within the scale's choice sections are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum AnswerMode {
    /// Exactly one answer per section (radio-like).
    SingleChoice,
    /// Independently toggleable options (checkbox-like).
    MultiSelect,
}

/// The kind of raw value a freeform field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValueType {
    Number,
    Text,
}

/// One enumerated answer within a choice section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub value: String,
    pub weight: f64,
    pub label: String,
    pub default_selected: bool,
}

impl ChoiceOption {
    pub fn new(value: &str, weight: f64, label: &str) -> Self {
        Self {
            value: value.to_string(),
            weight,
            label: label.to_string(),
            default_selected: false,
        }
    }

    /// Mark this option as selected when the scale is first shown.
    pub fn selected(mut self) -> Self {
        self.default_selected = true;
        self
    }
}

/// Descriptor for a field the answerer types into (age, lab value, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FreeformField {
    pub field_name: String,
    pub label: String,
    pub value_type: ValueType,
    pub step: Option<f64>,
    pub min: Option<f64>,
}

impl FreeformField {
    pub fn number(field_name: &str, label: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            label: label.to_string(),
            value_type: ValueType::Number,
            step: None,
            min: None,
        }
    }

    pub fn text(field_name: &str, label: &str) -> Self {
        Self {
            value_type: ValueType::Text,
            ..Self::number(field_name, label)
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum SectionKind {
    Choice { options: Vec<ChoiceOption> },
    Freeform { field: FreeformField },
}

/// A named group of related answer options within a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub field_name: String,
    pub kind: SectionKind,
}

impl Section {
    /// A choice section whose id doubles as its field name.
    pub fn choice(id: &str, title: &str, options: Vec<ChoiceOption>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            field_name: id.to_string(),
            kind: SectionKind::Choice { options },
        }
    }

    /// A freeform section bound to the field's own name.
    pub fn freeform(id: &str, title: &str, field: FreeformField) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            field_name: field.field_name.clone(),
            kind: SectionKind::Freeform { field },
        }
    }

    /// Override the binding key used to locate this section's inputs.
    pub fn bound_to(mut self, field_name: &str) -> Self {
        self.field_name = field_name.to_string();
        if let SectionKind::Freeform { field } = &mut self.kind {
            field.field_name = field_name.to_string();
        }
        self
    }

    /// The enumerated options, empty for freeform sections.
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            SectionKind::Choice { options } => options,
            SectionKind::Freeform { .. } => &[],
        }
    }

    pub fn option(&self, value: &str) -> Option<&ChoiceOption> {
        self.options().iter().find(|o| o.value == value)
    }

    pub fn is_freeform(&self) -> bool {
        matches!(self.kind, SectionKind::Freeform { .. })
    }
}

/// An ordered interpretation rule: the first rule whose predicate holds wins.
#[derive(Debug, Clone)]
pub struct InterpretationRule {
    pub predicate: RulePredicate,
    pub risk_label: String,
    pub explanation: String,
}

impl InterpretationRule {
    pub fn new(risk_label: &str, explanation: &str, predicate: RulePredicate) -> Self {
        Self {
            predicate,
            risk_label: risk_label.to_string(),
            explanation: explanation.to_string(),
        }
    }

    pub fn matches(&self, score: &Score) -> bool {
        (self.predicate)(score.value, &score.flags)
    }
}

/// Identity and behavior contract for one questionnaire.
#[derive(Debug, Clone)]
pub struct ScaleDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub answer_mode: AnswerMode,
    pub sections: Vec<Section>,
    pub score_formula: ScoreFormula,
    pub result_formatter: Option<ResultFormatter>,
    pub interpretation_rules: Vec<InterpretationRule>,
    pub max_score: Option<f64>,
}

impl ScaleDefinition {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Find the section whose inputs are bound to `field_name`.
    pub fn section_for_field(&self, field_name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.field_name == field_name)
    }

    /// The renderer-facing view of this definition, without its functions.
    pub fn descriptor(&self) -> ScaleDescriptor {
        ScaleDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            answer_mode: self.answer_mode,
            sections: self.sections.clone(),
            max_score: self.max_score,
        }
    }
}

/// Serializable description of a scale for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub answer_mode: AnswerMode,
    pub sections: Vec<Section>,
    pub max_score: Option<f64>,
}
