use std::collections::BTreeSet;

use medscale_core::models::definition::{AnswerMode, ScaleDefinition, SectionKind};
use medscale_core::models::result::{EvaluationResult, FormattedScore, Interpretation};
use medscale_storage::kv::KeyValueStore;
use medscale_storage::state::StateStore;

use crate::display::ResultSink;
use crate::error::EngineError;
use crate::evaluate;
use crate::extract::extract;
use crate::replay::{capture, replay};
use crate::surface::InputSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Restoring,
    Ready,
}

/// An edit to one field of a scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerChange {
    /// Choose an option in a single-choice group.
    Select { field: String, value: String },
    /// Turn a multi-select option on or off.
    Toggle { field: String, value: String, on: bool },
    /// Replace a freeform field's raw text.
    Enter { field: String, text: String },
    /// Deselect all toggles of a field, or empty its text.
    Clear { field: String },
}

impl AnswerChange {
    pub fn field(&self) -> &str {
        match self {
            AnswerChange::Select { field, .. }
            | AnswerChange::Toggle { field, .. }
            | AnswerChange::Enter { field, .. }
            | AnswerChange::Clear { field } => field,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            AnswerChange::Select { .. } => "select",
            AnswerChange::Toggle { .. } => "toggle",
            AnswerChange::Enter { .. } => "enter text into",
            AnswerChange::Clear { .. } => "clear",
        }
    }
}

/// Drives one scale: restore, then extract → evaluate → resolve → publish →
/// persist on every change.
pub struct ScaleSession<'a, S> {
    definition: &'a ScaleDefinition,
    surface: S,
    phase: SessionPhase,
    bound_fields: BTreeSet<String>,
    last_result: Option<EvaluationResult>,
}

impl<'a, S: InputSurface> ScaleSession<'a, S> {
    pub fn new(definition: &'a ScaleDefinition, surface: S) -> Self {
        Self {
            definition,
            surface,
            phase: SessionPhase::Uninitialized,
            bound_fields: BTreeSet::new(),
            last_result: None,
        }
    }

    pub fn definition(&self) -> &'a ScaleDefinition {
        self.definition
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access to the inputs. Follow edits with [`Self::notify`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn last_result(&self) -> Option<&EvaluationResult> {
        self.last_result.as_ref()
    }

    /// Whether change notifications for `field` reach this session.
    pub fn is_bound(&self, field: &str) -> bool {
        self.bound_fields.contains(field)
    }

    /// Bind every section's inputs, restore saved answers, and evaluate once.
    ///
    /// Missing or corrupt saved state leaves the surface at its defaults.
    pub fn initialize<K: KeyValueStore>(
        &mut self,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> EvaluationResult {
        let definition = self.definition;
        let scale_id = definition.id.as_str();
        self.bound_fields = definition
            .sections
            .iter()
            .map(|s| s.field_name.clone())
            .collect();

        self.phase = SessionPhase::Restoring;
        if let Some(state) = store.load(scale_id) {
            let report = replay(definition, &mut self.surface, &state);
            if report.skipped.is_empty() {
                tracing::debug!(scale_id, applied = report.applied.len(), "answers restored");
            } else {
                tracing::debug!(
                    scale_id,
                    applied = report.applied.len(),
                    skipped = ?report.skipped,
                    "answers restored, stale entries skipped"
                );
            }
        }
        self.phase = SessionPhase::Ready;

        self.recompute(store, sink)
    }

    /// Re-run the pipeline against the current surface.
    ///
    /// Calling this twice without an intervening edit publishes and persists
    /// identical results. An uninitialized session initializes first so that
    /// saved answers are never overwritten before they are restored.
    pub fn on_answer_changed<K: KeyValueStore>(
        &mut self,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> EvaluationResult {
        if self.phase != SessionPhase::Ready {
            return self.initialize(store, sink);
        }
        self.recompute(store, sink)
    }

    /// Change notification for `field`. Fields this session does not own
    /// are ignored and yield `None`.
    pub fn notify<K: KeyValueStore>(
        &mut self,
        field: &str,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> Option<EvaluationResult> {
        if !self.is_bound(field) {
            return None;
        }
        Some(self.on_answer_changed(store, sink))
    }

    /// Apply one edit to the surface and run the change path.
    pub fn apply<K: KeyValueStore>(
        &mut self,
        change: &AnswerChange,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> Result<EvaluationResult, EngineError> {
        self.ensure_ready(store, sink);
        let definition = self.definition;
        let scale_id = definition.id.as_str();
        let field = change.field();
        let section = definition.section_for_field(field).ok_or_else(|| {
            EngineError::UnknownField {
                scale_id: scale_id.to_string(),
                field: field.to_string(),
            }
        })?;

        let unsupported = || EngineError::UnsupportedChange {
            scale_id: scale_id.to_string(),
            field: field.to_string(),
            change: change.verb(),
        };
        let unknown_option = |value: &str| EngineError::UnknownOption {
            scale_id: scale_id.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        };

        let mode = definition.answer_mode;
        let choice = matches!(section.kind, SectionKind::Choice { .. });
        let applied = match change {
            AnswerChange::Select { value, .. } if choice && mode == AnswerMode::SingleChoice => {
                if section.option(value).is_none() {
                    return Err(unknown_option(value));
                }
                self.surface.select(field, value)
            }
            AnswerChange::Toggle { value, on, .. } if choice && mode == AnswerMode::MultiSelect => {
                if section.option(value).is_none() {
                    return Err(unknown_option(value));
                }
                self.surface.set_toggle(field, value, *on)
            }
            AnswerChange::Enter { text, .. } if !choice => self.surface.set_text(field, text),
            AnswerChange::Clear { .. } if !choice || mode == AnswerMode::MultiSelect => {
                self.surface.clear(field)
            }
            _ => return Err(unsupported()),
        };
        if !applied {
            return Err(unsupported());
        }

        Ok(self.on_answer_changed(store, sink))
    }

    /// Replace the surface (typically with a freshly laid out one carrying
    /// only defaults) and run the change path.
    pub fn reset<K: KeyValueStore>(
        &mut self,
        surface: S,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> EvaluationResult {
        self.ensure_ready(store, sink);
        self.surface = surface;
        tracing::debug!(scale_id = %self.definition.id, "answers reset to defaults");
        self.on_answer_changed(store, sink)
    }

    /// Edits made before initialization would be clobbered by the restore.
    fn ensure_ready<K: KeyValueStore>(
        &mut self,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) {
        if self.phase != SessionPhase::Ready {
            self.initialize(store, sink);
        }
    }

    fn recompute<K: KeyValueStore>(
        &mut self,
        store: &mut StateStore<K>,
        sink: &mut impl ResultSink,
    ) -> EvaluationResult {
        let definition = self.definition;
        let scale_id = definition.id.as_str();
        let values = extract(definition, &self.surface);
        let result = evaluate::run(definition, &values);

        sink.publish(
            scale_id,
            &FormattedScore::new(
                result.formatted_total.clone(),
                result.formatted_detail.clone(),
            ),
            &Interpretation {
                risk_label: result.risk_label.clone(),
                explanation: result.explanation.clone(),
            },
        );

        let state = capture(definition, &self.surface);
        if let Err(e) = store.save(scale_id, &state) {
            // Keep going: the displayed result is still correct, only
            // persistence across restarts is lost.
            tracing::warn!(scale_id, error = %e, "failed to persist answers");
        }

        self.last_result = Some(result.clone());
        result
    }
}
