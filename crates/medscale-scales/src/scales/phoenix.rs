use medscale_core::models::definition::{
    AnswerMode, ChoiceOption, InterpretationRule, ScaleDefinition, Section,
};
use medscale_core::models::result::{FormattedScore, format_number};
use medscale_core::models::score::{Score, ScoreFlags};
use medscale_core::models::values::ValuesMap;

pub const ID: &str = "phoenix";

/// Raised when any cardiovascular sub-domain scores above zero.
pub const CARDIOVASCULAR_DYSFUNCTION: &str = "cardiovascular_dysfunction";

/// The sections whose points make up the cardiovascular sub-domain.
pub const CARDIOVASCULAR_SECTIONS: [&str; 3] = ["vasoactive", "lactate", "map"];

/// Phoenix Sepsis Score: pediatric sepsis and septic shock criteria.
/// Respiratory 0–3, three cardiovascular items 0–2 each, coagulation 0–2,
/// neurologic 0–2. Total 0–13.
pub fn definition() -> ScaleDefinition {
    ScaleDefinition {
        id: ID.to_string(),
        name: "Phoenix Sepsis Score".to_string(),
        description: "Grades pediatric sepsis severity and septic shock risk".to_string(),
        answer_mode: AnswerMode::SingleChoice,
        sections: vec![
            Section::choice(
                "respiratory",
                "Respiratory (max 3)",
                vec![
                    ChoiceOption::new("0", 0.0, "PaO2/FiO2 ≥400 or SpO2/FiO2 ≥292").selected(),
                    ChoiceOption::new(
                        "1",
                        1.0,
                        "PaO2/FiO2 <400 or SpO2/FiO2 <292 on any respiratory support",
                    ),
                    ChoiceOption::new(
                        "2",
                        2.0,
                        "PaO2/FiO2 100-200 with IMV or SpO2/FiO2 148-220 with IMV",
                    ),
                    ChoiceOption::new("3", 3.0, "PaO2/FiO2 <100 with IMV or SpO2/FiO2 <148 with IMV"),
                ],
            ),
            Section::choice(
                "vasoactive",
                "Cardiovascular: vasoactive medications (max 2)",
                vec![
                    ChoiceOption::new("0", 0.0, "No vasoactive medications").selected(),
                    ChoiceOption::new("1", 1.0, "1 vasoactive medication"),
                    ChoiceOption::new("2", 2.0, "2 or more vasoactive medications"),
                ],
            ),
            Section::choice(
                "lactate",
                "Cardiovascular: lactate (max 2)",
                vec![
                    ChoiceOption::new("0", 0.0, "<5 mmol/L").selected(),
                    ChoiceOption::new("1", 1.0, "5-10.9 mmol/L"),
                    ChoiceOption::new("2", 2.0, ">10.9 mmol/L"),
                ],
            ),
            Section::choice(
                "map",
                "Cardiovascular: mean arterial pressure (max 2)",
                vec![
                    ChoiceOption::new("0", 0.0, "Within the normal range for age").selected(),
                    ChoiceOption::new("1", 1.0, "Mildly below normal for age"),
                    ChoiceOption::new("2", 2.0, "Markedly below normal for age"),
                ],
            ),
            Section::choice(
                "coagulation",
                "Coagulation (max 2)",
                vec![
                    ChoiceOption::new("0", 0.0, "No coagulopathy").selected(),
                    ChoiceOption::new("1", 1.0, "One abnormal coagulation measure"),
                    ChoiceOption::new("2", 2.0, "Two or more abnormal coagulation measures"),
                ],
            ),
            Section::choice(
                "neurologic",
                "Neurologic (max 2)",
                vec![
                    ChoiceOption::new("0", 0.0, "GCS >10 and reactive pupils").selected(),
                    ChoiceOption::new("1", 1.0, "GCS ≤10"),
                    ChoiceOption::new("2", 2.0, "Bilaterally fixed pupils"),
                ],
            ),
        ],
        score_formula: score,
        result_formatter: Some(format),
        interpretation_rules: vec![
            InterpretationRule::new(
                "No sepsis",
                "Does not meet sepsis criteria at present; keep monitoring the infection.",
                |score, _| score < 2.0,
            ),
            InterpretationRule::new(
                "Sepsis",
                "Meets sepsis criteria (suspected infection with a score of 2 or more). \
                 Start the sepsis care pathway.",
                |score, flags| score >= 2.0 && !flags.is_raised(CARDIOVASCULAR_DYSFUNCTION),
            ),
            InterpretationRule::new(
                "Septic shock",
                "Meets septic shock criteria (sepsis with at least 1 cardiovascular point). \
                 Start aggressive treatment immediately.",
                |score, flags| score >= 2.0 && flags.is_raised(CARDIOVASCULAR_DYSFUNCTION),
            ),
        ],
        max_score: Some(13.0),
    }
}

/// Sum of all six sections. The cardiovascular flag is derived from the
/// three cardiovascular sections directly.
pub fn score(values: &ValuesMap) -> Score {
    let mut flags = ScoreFlags::new();
    flags.raise_if(
        CARDIOVASCULAR_DYSFUNCTION,
        CARDIOVASCULAR_SECTIONS
            .iter()
            .any(|id| values.weight(id) > 0.0),
    );

    let total = values.weight("respiratory")
        + cardiovascular_points(values)
        + values.weight("coagulation")
        + values.weight("neurologic");
    Score::flagged(total, flags)
}

fn cardiovascular_points(values: &ValuesMap) -> f64 {
    CARDIOVASCULAR_SECTIONS
        .iter()
        .map(|id| values.weight(id))
        .sum()
}

fn format(values: &ValuesMap, score: &Score) -> FormattedScore {
    FormattedScore::new(
        format_number(score.value),
        format!(
            "Respiratory: {}, Cardiovascular: {}, Coagulation: {}, Neurologic: {}",
            format_number(values.weight("respiratory")),
            format_number(cardiovascular_points(values)),
            format_number(values.weight("coagulation")),
            format_number(values.weight("neurologic")),
        ),
    )
}
