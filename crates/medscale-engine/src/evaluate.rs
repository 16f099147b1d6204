use medscale_core::models::definition::ScaleDefinition;
use medscale_core::models::result::{EvaluationResult, FormattedScore};
use medscale_core::models::score::Score;
use medscale_core::models::values::ValuesMap;

use crate::resolve::resolve;

/// Run the scale's formula. A non-finite result is normalized to `0` so
/// that rule predicates always see a usable number.
pub fn evaluate(definition: &ScaleDefinition, values: &ValuesMap) -> Score {
    let mut score = (definition.score_formula)(values);
    if !score.value.is_finite() {
        tracing::warn!(
            scale_id = %definition.id,
            value = %score.value,
            "formula produced a non-finite score, using 0"
        );
        score.value = 0.0;
    }
    score
}

/// Render the score with the scale's formatter, or the bare number.
pub fn format(definition: &ScaleDefinition, values: &ValuesMap, score: &Score) -> FormattedScore {
    match definition.result_formatter {
        Some(formatter) => formatter(values, score),
        None => FormattedScore::from_score(score),
    }
}

/// Evaluate, format, and resolve in one pass.
pub fn run(definition: &ScaleDefinition, values: &ValuesMap) -> EvaluationResult {
    let score = evaluate(definition, values);
    let formatted = format(definition, values, &score);
    let interpretation = resolve(definition, &score);

    EvaluationResult {
        scale_id: definition.id.clone(),
        score: score.value,
        flags: score.flags.iter().map(str::to_string).collect(),
        formatted_total: formatted.total,
        formatted_detail: formatted.detail,
        risk_label: interpretation.risk_label,
        explanation: interpretation.explanation,
    }
}
