use medscale_core::models::definition::{
    AnswerMode, ChoiceOption, FreeformField, InterpretationRule, ScaleDefinition, Section,
};
use medscale_core::models::result::FormattedScore;
use medscale_core::models::score::{Score, ScoreFlags};
use medscale_core::models::values::ValuesMap;

use crate::scoring::{parse_number, shown};

pub const ID: &str = "gfr";

/// Raised when age or serum creatinine is missing or unusable. The score is
/// then `0` and no interpretation applies.
pub const INCOMPLETE: &str = "incomplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

/// Estimated GFR with the 2021 CKD-EPI creatinine equation (race-free).
pub fn definition() -> ScaleDefinition {
    ScaleDefinition {
        id: ID.to_string(),
        name: "eGFR (CKD-EPI 2021)".to_string(),
        description: "Estimates glomerular filtration rate from age, sex, and serum creatinine"
            .to_string(),
        answer_mode: AnswerMode::SingleChoice,
        sections: vec![
            Section::choice(
                "sex",
                "Sex",
                vec![
                    ChoiceOption::new("male", 0.0, "Male").selected(),
                    ChoiceOption::new("female", 0.0, "Female"),
                ],
            ),
            Section::freeform(
                "age",
                "Age (years)",
                FreeformField::number("age", "Enter age").min(1.0),
            ),
            Section::freeform(
                "scr",
                "Serum creatinine (mg/dL)",
                FreeformField::number("scr", "Enter creatinine")
                    .step(0.01)
                    .min(0.0),
            ),
        ],
        score_formula: score,
        result_formatter: Some(format),
        interpretation_rules: vec![
            InterpretationRule::new("Normal or high", "Kidney function is normal", |score, flags| {
                !flags.is_raised(INCOMPLETE) && score >= 90.0
            }),
            InterpretationRule::new("Mildly decreased", "Follow-up is advised", |score, flags| {
                !flags.is_raised(INCOMPLETE) && (60.0..90.0).contains(&score)
            }),
            InterpretationRule::new(
                "Moderately decreased",
                "Watch for chronic kidney disease",
                |score, flags| !flags.is_raised(INCOMPLETE) && (30.0..60.0).contains(&score),
            ),
            InterpretationRule::new(
                "Severely decreased",
                "Seek medical care promptly",
                |score, flags| !flags.is_raised(INCOMPLETE) && score < 30.0,
            ),
        ],
        max_score: None,
    }
}

pub fn score(values: &ValuesMap) -> Score {
    let sex = match values.choice("sex") {
        Some("female") => Sex::Female,
        _ => Sex::Male,
    };
    let age = parse_number(values.raw("age"));
    let scr = parse_number(values.raw("scr"));

    match (age, scr) {
        (Some(age), Some(scr)) if age >= 0.0 && scr > 0.0 => Score::new(egfr(sex, age, scr)),
        _ => {
            let mut flags = ScoreFlags::new();
            flags.raise(INCOMPLETE);
            Score::flagged(0.0, flags)
        }
    }
}

/// eGFR in mL/min/1.73m² for a positive creatinine in mg/dL.
///
/// 142 × (Scr/κ)^α × 0.9938^age × 1.012 [female], where κ is 0.7 (female)
/// or 0.9 (male), and α is -0.241 (female) or -0.302 (male) at or below κ,
/// -1.2 above it.
pub fn egfr(sex: Sex, age: f64, scr: f64) -> f64 {
    let (kappa, alpha_low, sex_factor) = match sex {
        Sex::Female => (0.7, -0.241, 1.012),
        Sex::Male => (0.9, -0.302, 1.0),
    };
    let alpha = if scr <= kappa { alpha_low } else { -1.2 };

    142.0 * (scr / kappa).powf(alpha) * 0.9938_f64.powf(age) * sex_factor
}

fn format(values: &ValuesMap, score: &Score) -> FormattedScore {
    let total = if score.flags.is_raised(INCOMPLETE) {
        "-".to_string()
    } else {
        format!("{:.1}", score.value)
    };
    FormattedScore::new(
        total,
        format!(
            "Age: {} y, Scr: {} mg/dL",
            shown(values.raw("age")),
            shown(values.raw("scr"))
        ),
    )
}
