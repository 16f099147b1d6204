use medscale_core::models::definition::{
    AnswerMode, ChoiceOption, InterpretationRule, ScaleDefinition, Section,
};
use medscale_core::models::result::FormattedScore;
use medscale_core::models::score::Score;
use medscale_core::models::values::ValuesMap;

use crate::scoring::{out_of, sum_of_weights};

pub const ID: &str = "stopbang";

const MAX: f64 = 8.0;

/// STOP-BANG: obstructive sleep apnea screening.
/// Eight yes/no risk factors, one point each. Total 0–8.
pub fn definition() -> ScaleDefinition {
    let factors = [
        ("snoring", "Snores loudly (audible through a closed door)"),
        ("tired", "Often tired, fatigued, or sleepy during the day"),
        ("observed", "Observed to stop breathing during sleep"),
        ("pressure", "High blood pressure or treated for it"),
        ("bmi", "BMI > 35 kg/m²"),
        ("age", "Age > 50 years"),
        ("neck", "Neck circumference > 40 cm"),
        ("gender", "Male sex"),
    ];

    ScaleDefinition {
        id: ID.to_string(),
        name: "STOP-BANG".to_string(),
        description: "Screens for obstructive sleep apnea risk".to_string(),
        answer_mode: AnswerMode::MultiSelect,
        sections: vec![
            Section::choice(
                "factors",
                "Risk factors",
                factors
                    .iter()
                    .map(|(value, label)| ChoiceOption::new(value, 1.0, label))
                    .collect(),
            )
            .bound_to("stopbang"),
        ],
        score_formula: sum_of_weights,
        result_formatter: Some(format),
        interpretation_rules: vec![
            InterpretationRule::new(
                "Low risk",
                "Low risk of obstructive sleep apnea",
                |score, _| score <= 2.0,
            ),
            InterpretationRule::new(
                "Moderate risk",
                "Moderate risk of obstructive sleep apnea",
                |score, _| (3.0..=4.0).contains(&score),
            ),
            InterpretationRule::new(
                "High risk",
                "High risk of obstructive sleep apnea",
                |score, _| (5.0..=6.0).contains(&score),
            ),
            InterpretationRule::new(
                "Very high risk",
                "Very high risk of obstructive sleep apnea",
                |score, _| score >= 7.0,
            ),
        ],
        max_score: Some(MAX),
    }
}

fn format(_values: &ValuesMap, score: &Score) -> FormattedScore {
    FormattedScore::new(out_of(score, MAX), "")
}
