use medscale_core::models::definition::{InterpretationRule, ScaleDefinition};
use medscale_core::models::result::Interpretation;
use medscale_core::models::score::Score;

/// The first rule, in declaration order, whose predicate holds.
pub fn first_match<'a>(
    definition: &'a ScaleDefinition,
    score: &Score,
) -> Option<&'a InterpretationRule> {
    definition
        .interpretation_rules
        .iter()
        .find(|rule| rule.matches(score))
}

/// Map a score to its interpretation. First match wins; when nothing
/// matches the interpretation is empty.
pub fn resolve(definition: &ScaleDefinition, score: &Score) -> Interpretation {
    match first_match(definition, score) {
        Some(rule) => Interpretation {
            risk_label: Some(rule.risk_label.clone()),
            explanation: Some(rule.explanation.clone()),
        },
        None => {
            tracing::debug!(
                scale_id = %definition.id,
                score = score.value,
                "no interpretation rule matched"
            );
            Interpretation::default()
        }
    }
}
