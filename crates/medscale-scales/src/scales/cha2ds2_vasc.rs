use medscale_core::models::definition::{
    AnswerMode, ChoiceOption, InterpretationRule, ScaleDefinition, Section,
};
use medscale_core::models::result::FormattedScore;
use medscale_core::models::score::Score;
use medscale_core::models::values::ValuesMap;

use crate::scoring::{out_of, sum_of_weights};

pub const ID: &str = "chads";

const MAX: f64 = 9.0;

/// CHA₂DS₂-VASc: stroke risk in atrial fibrillation.
/// Age ≥ 75 and prior stroke/TIA score 2, everything else 1. Total 0–9.
pub fn definition() -> ScaleDefinition {
    ScaleDefinition {
        id: ID.to_string(),
        name: "CHA₂DS₂-VASc".to_string(),
        description: "Estimates annual stroke risk in patients with atrial fibrillation"
            .to_string(),
        answer_mode: AnswerMode::MultiSelect,
        sections: vec![
            Section::choice(
                "factors",
                "Risk factors",
                vec![
                    ChoiceOption::new("chf", 1.0, "Congestive heart failure / LV dysfunction (1)"),
                    ChoiceOption::new("htn", 1.0, "Hypertension (1)"),
                    ChoiceOption::new("age75", 2.0, "Age ≥ 75 years (2)"),
                    ChoiceOption::new("diabetes", 1.0, "Diabetes mellitus (1)"),
                    ChoiceOption::new("stroke", 2.0, "Prior stroke / TIA / thromboembolism (2)"),
                    ChoiceOption::new("vascular", 1.0, "Vascular disease (1)"),
                    ChoiceOption::new("age65", 1.0, "Age 65-74 years (1)"),
                    ChoiceOption::new("female", 1.0, "Female sex (1)"),
                ],
            )
            .bound_to("chads"),
        ],
        score_formula: sum_of_weights,
        result_formatter: Some(format),
        interpretation_rules: vec![
            InterpretationRule::new("Low risk", "Annual stroke risk < 1%", |s, _| s == 0.0),
            InterpretationRule::new("Low-moderate risk", "Annual stroke risk about 1.3%", |s, _| {
                s == 1.0
            }),
            InterpretationRule::new("Moderate risk", "Annual stroke risk about 2.2%", |s, _| {
                s == 2.0
            }),
            InterpretationRule::new(
                "Moderate-high risk",
                "Annual stroke risk about 3.2%",
                |s, _| s == 3.0,
            ),
            InterpretationRule::new("High risk", "Annual stroke risk about 4.0%", |s, _| s == 4.0),
            InterpretationRule::new("High risk", "Annual stroke risk about 6.7%", |s, _| s == 5.0),
            InterpretationRule::new("High risk", "Annual stroke risk about 9.8%", |s, _| s == 6.0),
            InterpretationRule::new("High risk", "Annual stroke risk about 9.6%", |s, _| s == 7.0),
            InterpretationRule::new("High risk", "Annual stroke risk about 6.7%", |s, _| s == 8.0),
            InterpretationRule::new("Very high risk", "Annual stroke risk about 15.2%", |s, _| {
                s >= 9.0
            }),
        ],
        max_score: Some(MAX),
    }
}

fn format(_values: &ValuesMap, score: &Score) -> FormattedScore {
    FormattedScore::new(out_of(score, MAX), "")
}
