//! Locally persisted checklist completion.
//!
//! # Responsibility
//! - Model a boolean completion map over an ordered id set.
//! - Persist the map under a fixed feature key on every change.
//!
//! # Invariants
//! - `toggle` flips exactly one id.
//! - `set_all` rebuilds the map over the id set only.
//! - Missing or corrupt stored state restores as all-false.

use crate::repo::kv_repo::KvRepository;
use log::warn;
use std::collections::{BTreeMap, BTreeSet};

/// Storage key of the pipeline checklist on the overview page.
pub const PIPELINE_CHECKLIST_KEY: &str = "oz.dashboard.pipeline";

/// Boolean completion map over an ordered id set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistState {
    ids: Vec<String>,
    entries: BTreeMap<String, bool>,
}

impl ChecklistState {
    /// All-false state over `ids` (duplicates dropped, order kept).
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let ids: Vec<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let entries = ids.iter().map(|id| (id.clone(), false)).collect();
        Self { ids, entries }
    }

    /// All-false base over `ids` overlaid with a stored JSON map.
    ///
    /// Stored keys outside `ids` are kept, matching what was persisted.
    ///
    /// # Errors
    /// - Returns the decode error when `raw` is not a JSON `{id: bool}` map.
    pub fn restore<I, S>(ids: I, raw: &str) -> Result<Self, serde_json::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stored: BTreeMap<String, bool> = serde_json::from_str(raw)?;
        let mut state = Self::new(ids);
        state.entries.extend(stored);
        Ok(state)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn entries(&self) -> &BTreeMap<String, bool> {
        &self.entries
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Flips one id; unknown ids start from `false`.
    pub fn toggle(&mut self, id: &str) {
        let entry = self.entries.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Sets every id in the id set to `value`, dropping other keys.
    pub fn set_all(&mut self, value: bool) {
        self.entries = self.ids.iter().map(|id| (id.clone(), value)).collect();
    }

    /// Checked ids within the id set.
    pub fn completed_count(&self) -> usize {
        self.ids.iter().filter(|id| self.is_checked(id)).count()
    }

    /// Completed fraction in `0.0..=1.0`; `0.0` for an empty id set.
    pub fn completion(&self) -> f64 {
        if self.ids.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.ids.len() as f64
    }

    /// Serialized form written to storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }
}

/// Loads and persists checklist state per feature key.
pub struct ChecklistService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> ChecklistService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Restores state for `key`, or all-false when absent or unreadable.
    pub fn load<I, S>(&self, key: &str, ids: I) -> ChecklistState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        match self.repo.get(key) {
            Ok(Some(raw)) => match ChecklistState::restore(ids.clone(), &raw) {
                Ok(state) => state,
                Err(err) => {
                    warn!(
                        "event=checklist_load module=service status=corrupt key={key} error={err}"
                    );
                    ChecklistState::new(ids)
                }
            },
            Ok(None) => ChecklistState::new(ids),
            Err(err) => {
                warn!("event=checklist_load module=service status=error key={key} error={err}");
                ChecklistState::new(ids)
            }
        }
    }

    /// Writes `state` under `key`. Returns whether the write succeeded.
    pub fn save(&self, key: &str, state: &ChecklistState) -> bool {
        let result = state
            .to_json()
            .map_err(|err| err.to_string())
            .and_then(|raw| self.repo.put(key, &raw).map_err(|err| err.to_string()));
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("event=checklist_save module=service status=error key={key} error={err}");
                false
            }
        }
    }

    /// Flips `id` and persists the new state.
    pub fn toggle(&self, key: &str, state: &mut ChecklistState, id: &str) -> bool {
        state.toggle(id);
        self.save(key, state)
    }

    /// Sets every id to `value` and persists the new state.
    pub fn set_all(&self, key: &str, state: &mut ChecklistState, value: bool) -> bool {
        state.set_all(value);
        self.save(key, state)
    }

    /// Forgets stored state for `key`.
    pub fn reset(&self, key: &str) -> bool {
        match self.repo.remove(key) {
            Ok(_) => true,
            Err(err) => {
                warn!("event=checklist_reset module=service status=error key={key} error={err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChecklistState;

    #[test]
    fn new_state_is_all_false_without_duplicates() {
        let state = ChecklistState::new(["a", "b", "a"]);
        assert_eq!(state.ids(), ["a".to_string(), "b".to_string()]);
        assert!(state.entries().values().all(|checked| !checked));
    }

    #[test]
    fn restore_overlays_stored_values() {
        let state = ChecklistState::restore(["a", "b"], r#"{"b":true,"legacy":true}"#)
            .expect("valid stored map");
        assert!(!state.is_checked("a"));
        assert!(state.is_checked("b"));
        assert!(state.is_checked("legacy"));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn restore_rejects_non_boolean_maps() {
        assert!(ChecklistState::restore(["a"], r#"{"a":"yes"}"#).is_err());
        assert!(ChecklistState::restore(["a"], "not json").is_err());
    }

    #[test]
    fn completion_is_zero_for_empty_id_set() {
        let state = ChecklistState::new(Vec::<String>::new());
        assert_eq!(state.completion(), 0.0);
    }

    #[test]
    fn completion_counts_only_ids_in_set() {
        let mut state = ChecklistState::new(["a", "b", "c", "d"]);
        state.toggle("a");
        state.toggle("outside");
        assert_eq!(state.completion(), 0.25);
    }
}
