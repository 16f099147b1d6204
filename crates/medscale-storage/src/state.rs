use medscale_core::models::state::PersistedState;
use medscale_core::store_keys;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Per-scale answer state on top of a key-value backend.
#[derive(Debug, Clone)]
pub struct StateStore<K> {
    backend: K,
}

impl<K: KeyValueStore> StateStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }

    /// Overwrite the stored state for `scale_id`.
    pub fn save(&mut self, scale_id: &str, state: &PersistedState) -> Result<(), StorageError> {
        let json = state.to_json()?;
        self.backend.set(&store_keys::scale_state(scale_id), &json)?;
        tracing::debug!(scale_id, fields = state.len(), "answer state saved");
        Ok(())
    }

    /// Load the stored state for `scale_id`.
    ///
    /// Missing, unreadable, and malformed entries all load as `None`: callers
    /// proceed exactly as if nothing had ever been saved. Individual entries
    /// of the wrong shape are dropped and the rest are kept.
    pub fn load(&self, scale_id: &str) -> Option<PersistedState> {
        let key = store_keys::scale_state(scale_id);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(scale_id, "no saved answer state");
                return None;
            }
            Err(e) => {
                tracing::warn!(scale_id, error = %e, "failed to read answer state, ignoring");
                return None;
            }
        };

        match PersistedState::parse(&raw) {
            Ok(parsed) => {
                if !parsed.skipped.is_empty() {
                    tracing::warn!(
                        scale_id,
                        skipped = ?parsed.skipped,
                        "dropped malformed answer state entries"
                    );
                }
                Some(parsed.state)
            }
            Err(e) => {
                tracing::warn!(scale_id, error = %e, "discarding corrupt answer state");
                None
            }
        }
    }

    /// Forget the stored state for `scale_id`.
    pub fn clear(&mut self, scale_id: &str) -> Result<(), StorageError> {
        self.backend.remove(&store_keys::scale_state(scale_id))
    }

    /// Read a plain string entry, such as the active scale id.
    pub fn get_value(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read entry, ignoring");
                None
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend.set(key, value)
    }
}
