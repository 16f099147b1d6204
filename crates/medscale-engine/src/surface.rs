use std::collections::BTreeMap;

use medscale_core::models::definition::{AnswerMode, ScaleDefinition, SectionKind};

/// One input control bound to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputElement {
    /// Radio-like option within a single-choice group.
    Choice { value: String, selected: bool },
    /// Checkbox-like option that toggles independently.
    Toggle { value: String, selected: bool },
    /// Free text or numeric entry.
    Text { value: String },
}

/// The answer controls a session reads from and restores into.
///
/// Setters return `false` when the field has no input of the right shape
/// carrying the given value; the surface is then left untouched.
pub trait InputSurface {
    /// Enumerate the inputs bound to `field`, in declaration order.
    fn inputs(&self, field: &str) -> Vec<InputElement>;

    /// Select `value` in a single-choice group, deselecting the others.
    fn select(&mut self, field: &str, value: &str) -> bool;

    /// Turn one independent toggle on or off.
    fn set_toggle(&mut self, field: &str, value: &str, on: bool) -> bool;

    /// Replace the raw text of a freeform field.
    fn set_text(&mut self, field: &str, text: &str) -> bool;

    /// Deselect every toggle of `field`, or empty its text.
    fn clear(&mut self, field: &str) -> bool;

    /// Values of the selected choices or toggles of `field`.
    fn selected(&self, field: &str) -> Vec<String> {
        self.inputs(field)
            .into_iter()
            .filter_map(|input| match input {
                InputElement::Choice { value, selected: true }
                | InputElement::Toggle { value, selected: true } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Raw text of a freeform field, `None` when the field has no text input.
    fn text(&self, field: &str) -> Option<String> {
        self.inputs(field).into_iter().find_map(|input| match input {
            InputElement::Text { value } => Some(value),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Group(Vec<(String, bool)>),
    Toggles(Vec<(String, bool)>),
    Field(String),
}

/// In-memory input surface laid out from a scale definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSurface {
    controls: BTreeMap<String, Control>,
}

impl FormSurface {
    /// Build the controls for every section, with default selections applied.
    pub fn from_definition(definition: &ScaleDefinition) -> Self {
        let controls = definition
            .sections
            .iter()
            .map(|section| {
                let control = match &section.kind {
                    SectionKind::Choice { options } => {
                        let inputs = options
                            .iter()
                            .map(|o| (o.value.clone(), o.default_selected))
                            .collect();
                        match definition.answer_mode {
                            AnswerMode::SingleChoice => Control::Group(inputs),
                            AnswerMode::MultiSelect => Control::Toggles(inputs),
                        }
                    }
                    SectionKind::Freeform { .. } => Control::Field(String::new()),
                };
                (section.field_name.clone(), control)
            })
            .collect();
        Self { controls }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }
}

impl InputSurface for FormSurface {
    fn inputs(&self, field: &str) -> Vec<InputElement> {
        match self.controls.get(field) {
            Some(Control::Group(options)) => options
                .iter()
                .map(|(value, selected)| InputElement::Choice {
                    value: value.clone(),
                    selected: *selected,
                })
                .collect(),
            Some(Control::Toggles(options)) => options
                .iter()
                .map(|(value, selected)| InputElement::Toggle {
                    value: value.clone(),
                    selected: *selected,
                })
                .collect(),
            Some(Control::Field(text)) => vec![InputElement::Text {
                value: text.clone(),
            }],
            None => Vec::new(),
        }
    }

    fn select(&mut self, field: &str, value: &str) -> bool {
        let Some(Control::Group(options)) = self.controls.get_mut(field) else {
            return false;
        };
        if !options.iter().any(|(v, _)| v == value) {
            return false;
        }
        for (v, selected) in options.iter_mut() {
            *selected = v == value;
        }
        true
    }

    fn set_toggle(&mut self, field: &str, value: &str, on: bool) -> bool {
        let Some(Control::Toggles(options)) = self.controls.get_mut(field) else {
            return false;
        };
        match options.iter_mut().find(|(v, _)| v == value) {
            Some((_, selected)) => {
                *selected = on;
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, field: &str, text: &str) -> bool {
        match self.controls.get_mut(field) {
            Some(Control::Field(current)) => {
                *current = text.to_string();
                true
            }
            _ => false,
        }
    }

    fn clear(&mut self, field: &str) -> bool {
        match self.controls.get_mut(field) {
            Some(Control::Toggles(options)) => {
                for (_, selected) in options.iter_mut() {
                    *selected = false;
                }
                true
            }
            Some(Control::Field(current)) => {
                current.clear();
                true
            }
            _ => false,
        }
    }
}
