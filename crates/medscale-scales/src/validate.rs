use std::collections::HashSet;

use medscale_core::models::definition::{AnswerMode, ScaleDefinition, SectionKind};
use thiserror::Error;

/// A structural problem in a scale definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("{scale_id}: duplicate section id '{section_id}'")]
    DuplicateSection { scale_id: String, section_id: String },

    #[error("{scale_id}: field '{field}' is bound by more than one section")]
    DuplicateField { scale_id: String, field: String },

    #[error("{scale_id}: choice section '{section_id}' has no options")]
    EmptyChoice { scale_id: String, section_id: String },

    #[error("{scale_id}: section '{section_id}' declares option '{value}' more than once")]
    DuplicateOption {
        scale_id: String,
        section_id: String,
        value: String,
    },

    #[error("{scale_id}: single-choice section '{section_id}' selects {count} options by default")]
    MultipleDefaults {
        scale_id: String,
        section_id: String,
        count: usize,
    },

    #[error("{scale_id}: no interpretation rules")]
    NoRules { scale_id: String },
}

/// Check a definition for problems that would make extraction or
/// restoration ambiguous.
pub fn validate_definition(definition: &ScaleDefinition) -> Vec<DefinitionError> {
    let scale_id = || definition.id.clone();
    let mut errors = Vec::new();
    let mut section_ids = HashSet::new();
    let mut fields = HashSet::new();

    for section in &definition.sections {
        if !section_ids.insert(section.id.as_str()) {
            errors.push(DefinitionError::DuplicateSection {
                scale_id: scale_id(),
                section_id: section.id.clone(),
            });
        }
        if !fields.insert(section.field_name.as_str()) {
            errors.push(DefinitionError::DuplicateField {
                scale_id: scale_id(),
                field: section.field_name.clone(),
            });
        }

        let SectionKind::Choice { options } = &section.kind else {
            continue;
        };
        if options.is_empty() {
            errors.push(DefinitionError::EmptyChoice {
                scale_id: scale_id(),
                section_id: section.id.clone(),
            });
        }

        let mut values = HashSet::new();
        for option in options {
            if !values.insert(option.value.as_str()) {
                errors.push(DefinitionError::DuplicateOption {
                    scale_id: scale_id(),
                    section_id: section.id.clone(),
                    value: option.value.clone(),
                });
            }
        }

        let defaults = options.iter().filter(|o| o.default_selected).count();
        if definition.answer_mode == AnswerMode::SingleChoice && defaults > 1 {
            errors.push(DefinitionError::MultipleDefaults {
                scale_id: scale_id(),
                section_id: section.id.clone(),
                count: defaults,
            });
        }
    }

    if definition.interpretation_rules.is_empty() {
        errors.push(DefinitionError::NoRules {
            scale_id: scale_id(),
        });
    }

    errors
}
