use medscale_core::models::definition::ScaleDefinition;
use medscale_core::models::result::EvaluationResult;
use medscale_core::store_keys;
use medscale_storage::kv::KeyValueStore;
use medscale_storage::state::StateStore;

use crate::display::{DisplaySlots, MemoryDisplay};
use crate::error::EngineError;
use crate::session::{AnswerChange, ScaleSession};
use crate::surface::FormSurface;

/// Every scale's session over one shared store, plus which scale is active.
///
/// Sessions are independent; the store is partitioned by scale id. The
/// active scale only matters to the caller's UI and is remembered across
/// restarts.
pub struct Workbench<'a, K> {
    sessions: Vec<ScaleSession<'a, FormSurface>>,
    store: StateStore<K>,
    display: MemoryDisplay,
    active: Option<usize>,
}

impl<'a, K: KeyValueStore> Workbench<'a, K> {
    /// Lay out and initialize a session per definition, restoring saved
    /// answers and the last active scale.
    pub fn open(definitions: &'a [ScaleDefinition], mut store: StateStore<K>) -> Self {
        let mut display = MemoryDisplay::new();
        let sessions = definitions
            .iter()
            .map(|definition| {
                let mut session =
                    ScaleSession::new(definition, FormSurface::from_definition(definition));
                session.initialize(&mut store, &mut display);
                session
            })
            .collect::<Vec<_>>();

        let saved = store.get_value(store_keys::ACTIVE_SCALE);
        let active = match saved
            .as_deref()
            .and_then(|id| sessions.iter().position(|s| s.definition().id == id))
        {
            Some(index) => Some(index),
            None => {
                if let Some(id) = saved {
                    tracing::debug!(scale_id = %id, "saved active scale is not registered");
                }
                (!sessions.is_empty()).then_some(0)
            }
        };

        Self {
            sessions,
            store,
            display,
            active,
        }
    }

    pub fn definitions(&self) -> impl Iterator<Item = &'a ScaleDefinition> + '_ {
        self.sessions.iter().map(|s| s.definition())
    }

    /// The active scale, `None` only when no scales are registered.
    pub fn active(&self) -> Option<&'a ScaleDefinition> {
        self.active.map(|index| self.sessions[index].definition())
    }

    /// Make `scale_id` the active scale and remember it.
    pub fn activate(&mut self, scale_id: &str) -> Result<(), EngineError> {
        let index = self.index_of(scale_id)?;
        self.active = Some(index);
        if let Err(e) = self.store.set_value(store_keys::ACTIVE_SCALE, scale_id) {
            tracing::warn!(scale_id, error = %e, "failed to remember active scale");
        }
        tracing::info!(scale_id, "active scale changed");
        Ok(())
    }

    pub fn session(&self, scale_id: &str) -> Result<&ScaleSession<'a, FormSurface>, EngineError> {
        let index = self.index_of(scale_id)?;
        Ok(&self.sessions[index])
    }

    /// Apply an edit to one scale and return its new result.
    pub fn apply(
        &mut self,
        scale_id: &str,
        change: &AnswerChange,
    ) -> Result<EvaluationResult, EngineError> {
        let index = self.index_of(scale_id)?;
        self.sessions[index].apply(change, &mut self.store, &mut self.display)
    }

    /// Put one scale back to its section defaults.
    pub fn reset(&mut self, scale_id: &str) -> Result<EvaluationResult, EngineError> {
        let index = self.index_of(scale_id)?;
        let session = &mut self.sessions[index];
        let surface = FormSurface::from_definition(session.definition());
        Ok(session.reset(surface, &mut self.store, &mut self.display))
    }

    pub fn result(&self, scale_id: &str) -> Result<&EvaluationResult, EngineError> {
        self.session(scale_id)?
            .last_result()
            .ok_or_else(|| EngineError::UnknownScale(scale_id.to_string()))
    }

    /// The display slots last published for a scale.
    pub fn slots(&self, scale_id: &str) -> Result<DisplaySlots, EngineError> {
        self.index_of(scale_id)?;
        Ok(self.display.slots(scale_id).cloned().unwrap_or_default())
    }

    /// The copyable plain-text result for a scale.
    pub fn export_text(&self, scale_id: &str) -> Result<String, EngineError> {
        let definition = self.session(scale_id)?.definition();
        let slots = self.slots(scale_id)?;
        Ok(slots.export_text(&definition.name, definition.max_score))
    }

    pub fn store(&self) -> &StateStore<K> {
        &self.store
    }

    pub fn display(&self) -> &MemoryDisplay {
        &self.display
    }

    pub fn into_store(self) -> StateStore<K> {
        self.store
    }

    fn index_of(&self, scale_id: &str) -> Result<usize, EngineError> {
        self.sessions
            .iter()
            .position(|s| s.definition().id == scale_id)
            .ok_or_else(|| EngineError::UnknownScale(scale_id.to_string()))
    }
}
