use medscale_core::models::definition::{AnswerMode, ChoiceOption, ScaleDefinition, SectionKind};
use medscale_core::models::values::{FieldValue, Selection, ValuesMap};

use crate::surface::InputSurface;

/// Read the current answer state of every section into a [`ValuesMap`].
///
/// Never fails and never touches the surface:
/// - an unanswered single-choice section yields `Choice(None)` (weight 0);
/// - a multi-select section yields its selected options in declaration
///   order;
/// - a freeform section yields its raw text, empty when absent.
///
/// Selected values the definition does not declare are ignored.
pub fn extract(definition: &ScaleDefinition, surface: &impl InputSurface) -> ValuesMap {
    let mut values = ValuesMap::new();
    for section in &definition.sections {
        let field = section.field_name.as_str();
        let value = match (&section.kind, definition.answer_mode) {
            (SectionKind::Choice { .. }, AnswerMode::SingleChoice) => {
                let selected = surface.selected(field);
                FieldValue::Choice(
                    selected
                        .iter()
                        .find_map(|value| section.option(value))
                        .map(selection),
                )
            }
            (SectionKind::Choice { options }, AnswerMode::MultiSelect) => {
                let selected = surface.selected(field);
                FieldValue::Selections(
                    options
                        .iter()
                        .filter(|o| selected.contains(&o.value))
                        .map(selection)
                        .collect(),
                )
            }
            (SectionKind::Freeform { .. }, _) => {
                FieldValue::Raw(surface.text(field).unwrap_or_default())
            }
        };
        values.insert(&section.id, value);
    }
    values
}

fn selection(option: &ChoiceOption) -> Selection {
    Selection {
        value: option.value.clone(),
        weight: option.weight,
    }
}
