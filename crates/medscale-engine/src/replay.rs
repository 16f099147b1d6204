use medscale_core::models::definition::{AnswerMode, ScaleDefinition, Section, SectionKind};
use medscale_core::models::state::{PersistedState, StoredAnswer};

use crate::surface::InputSurface;

/// What a [`replay`] did with each stored field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub applied: Vec<String>,
    /// Fields left at their defaults: unknown fields, stale option values,
    /// or answers of the wrong shape.
    pub skipped: Vec<String>,
}

/// Snapshot the raw answers on the surface.
///
/// Single-choice sections store the selected option value, multi-select
/// sections the list of toggled values (an empty list is kept so that
/// default selections are not re-applied on restore), and freeform sections
/// their text when non-empty.
pub fn capture(definition: &ScaleDefinition, surface: &impl InputSurface) -> PersistedState {
    let mut state = PersistedState::new();
    for section in &definition.sections {
        let field = section.field_name.as_str();
        match (&section.kind, definition.answer_mode) {
            (SectionKind::Choice { .. }, AnswerMode::SingleChoice) => {
                if let Some(value) = surface
                    .selected(field)
                    .into_iter()
                    .find(|v| section.option(v).is_some())
                {
                    state.insert(field, StoredAnswer::One(value));
                }
            }
            (SectionKind::Choice { options }, AnswerMode::MultiSelect) => {
                let selected = surface.selected(field);
                let values = options
                    .iter()
                    .filter(|o| selected.contains(&o.value))
                    .map(|o| o.value.clone())
                    .collect();
                state.insert(field, StoredAnswer::Many(values));
            }
            (SectionKind::Freeform { .. }, _) => {
                if let Some(text) = surface.text(field).filter(|t| !t.is_empty()) {
                    state.insert(field, StoredAnswer::One(text));
                }
            }
        }
    }
    state
}

/// Write stored answers back onto the surface.
///
/// Anything that no longer fits the current definition is skipped and its
/// section keeps its default.
pub fn replay(
    definition: &ScaleDefinition,
    surface: &mut impl InputSurface,
    state: &PersistedState,
) -> RestoreReport {
    let mut report = RestoreReport::default();
    for (field, answer) in state.iter() {
        let applied = match definition.section_for_field(field) {
            Some(section) => replay_section(definition.answer_mode, section, surface, answer),
            None => false,
        };
        if applied {
            report.applied.push(field.to_string());
        } else {
            report.skipped.push(field.to_string());
        }
    }
    report
}

fn replay_section(
    mode: AnswerMode,
    section: &Section,
    surface: &mut impl InputSurface,
    answer: &StoredAnswer,
) -> bool {
    let field = section.field_name.as_str();
    match (&section.kind, mode, answer) {
        (SectionKind::Choice { .. }, AnswerMode::SingleChoice, StoredAnswer::One(value)) => {
            section.option(value).is_some() && surface.select(field, value)
        }
        (SectionKind::Choice { .. }, AnswerMode::MultiSelect, StoredAnswer::Many(values)) => {
            let known: Vec<&String> = values
                .iter()
                .filter(|v| section.option(v).is_some())
                .collect();
            // Only stale values stored: keep the defaults.
            if known.is_empty() && !values.is_empty() {
                return false;
            }
            surface.clear(field);
            for value in known {
                surface.set_toggle(field, value, true);
            }
            true
        }
        (SectionKind::Freeform { .. }, _, StoredAnswer::One(text)) => surface.set_text(field, text),
        _ => false,
    }
}
