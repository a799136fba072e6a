//! # Saved Searches
//!
//! Durable, named [`FacetSelection`] snapshots. The store owns the list and
//! is the only writer of the `"savedSearches"` slot; the controller only
//! keeps a weak `active` id into it (see [`crate::controller`]).
//!
//! Every mutation serializes the whole list — the slot is small and
//! last-writer-wins is fine because a single session owns it.
//!
//! Loading is deliberately forgiving: an entry that fails to deserialize is
//! skipped with a warning, an unparseable date inside an otherwise sound
//! entry degrades to "no bound" (see [`crate::selection`]), and a corrupt
//! slot as a whole yields an empty store. Startup never fails because of
//! stale persisted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardError, Result};
use crate::selection::FacetSelection;
use crate::store::KvBackend;

/// Key of the durable slot holding the serialized list.
pub const SAVED_SEARCHES_SLOT: &str = "savedSearches";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: Uuid,
    pub name: String,
    pub selection: FacetSelection,
    pub created_at: DateTime<Utc>,
}

pub struct SavedSearchStore<B: KvBackend> {
    backend: B,
    entries: Vec<SavedSearch>,
}

impl<B: KvBackend> SavedSearchStore<B> {
    /// Open the store, loading whatever the slot holds.
    pub fn open(backend: B) -> Result<Self> {
        let entries = match backend.get(SAVED_SEARCHES_SLOT)? {
            Some(raw) => parse_entries(&raw),
            None => Vec::new(),
        };
        Ok(Self { backend, entries })
    }

    pub fn entries(&self) -> &[SavedSearch] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedSearch> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SavedSearch> {
        self.entries.iter().find(|s| s.name == name)
    }

    /// First entry whose selection is set-equal to `selection`.
    ///
    /// Drives the "update this existing search instead?" pre-fill when the
    /// live selection already matches something saved.
    pub fn find_equivalent(&self, selection: &FacetSelection) -> Option<&SavedSearch> {
        self.entries
            .iter()
            .find(|s| s.selection.is_equivalent(selection))
    }

    /// Create a new entry at the end of the list.
    pub fn save(&mut self, name: &str, selection: FacetSelection) -> Result<SavedSearch> {
        let name = validated_name(name)?;
        let entry = SavedSearch {
            id: Uuid::new_v4(),
            name,
            selection,
            created_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    /// Overwrite an existing entry in place: same id, same position, fresh
    /// name/snapshot/timestamp. Unknown id is a no-op returning `None`.
    pub fn update(
        &mut self,
        id: Uuid,
        name: &str,
        selection: FacetSelection,
    ) -> Result<Option<SavedSearch>> {
        let name = validated_name(name)?;
        let Some(slot) = self.entries.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        slot.name = name;
        slot.selection = selection;
        slot.created_at = Utc::now();
        let updated = slot.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove an entry. Unknown id is a no-op returning `false`.
    ///
    /// The store has no notion of "active"; if the deleted entry was the
    /// controller's active one, the caller must tell the controller.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.backend.set(SAVED_SEARCHES_SLOT, &json)
    }
}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation(
            "saved search name cannot be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Per-entry tolerant parse: bad entries are dropped, good ones kept.
fn parse_entries(raw: &str) -> Vec<SavedSearch> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("saved searches slot is not a JSON list, starting empty: {}", e);
            return Vec::new();
        }
    };
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<SavedSearch>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping malformed saved search entry: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;

    fn store() -> SavedSearchStore<MemBackend> {
        SavedSearchStore::open(MemBackend::new()).unwrap()
    }

    fn selection_with_categories(categories: &[&str]) -> FacetSelection {
        let mut sel = FacetSelection::default();
        for c in categories {
            sel.toggle_category(c, true);
        }
        sel
    }

    #[test]
    fn blank_name_is_rejected_and_nothing_changes() {
        let mut store = store();
        let err = store.save("   ", FacetSelection::default());
        assert!(matches!(err, Err(BoardError::Validation(_))));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn save_trims_name_and_appends() {
        let mut store = store();
        let a = store.save("  EU calls ", FacetSelection::default()).unwrap();
        assert_eq!(a.name, "EU calls");
        let b = store.save("AI posts", FacetSelection::default()).unwrap();
        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.entries()[0].id, a.id);
        assert_eq!(store.entries()[1].id, b.id);
    }

    #[test]
    fn update_preserves_id_and_position() {
        let mut store = store();
        let first = store.save("first", FacetSelection::default()).unwrap();
        store.save("second", FacetSelection::default()).unwrap();

        let updated = store
            .update(first.id, "renamed", selection_with_categories(&["Events"]))
            .unwrap()
            .expect("entry exists");

        assert_eq!(updated.id, first.id);
        assert_eq!(store.entries()[0].name, "renamed");
        assert_eq!(store.entries()[0].selection.categories, vec!["Events"]);
        assert_eq!(store.entries()[1].name, "second");
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = store();
        store.save("only", FacetSelection::default()).unwrap();
        let result = store
            .update(Uuid::new_v4(), "ghost", FacetSelection::default())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.entries()[0].name, "only");
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = store();
        let kept = store.save("kept", FacetSelection::default()).unwrap();
        assert!(!store.delete(Uuid::new_v4()).unwrap());
        assert!(store.delete(kept.id).unwrap());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn find_equivalent_ignores_facet_order() {
        let mut store = store();
        store
            .save("mixed", selection_with_categories(&["Events", "Research"]))
            .unwrap();

        let probe = selection_with_categories(&["Research", "Events"]);
        let found = store.find_equivalent(&probe).expect("set-equal selection");
        assert_eq!(found.name, "mixed");

        let miss = selection_with_categories(&["Research"]);
        assert!(store.find_equivalent(&miss).is_none());
    }

    #[test]
    fn entries_survive_reopen_through_same_slot() {
        let backend = MemBackend::new();
        {
            let mut store = SavedSearchStore::open(&backend).unwrap();
            store
                .save("persisted", selection_with_categories(&["Projects"]))
                .unwrap();
        }
        let reopened = SavedSearchStore::open(&backend).unwrap();
        assert_eq!(reopened.entries().len(), 1);
        assert_eq!(reopened.entries()[0].name, "persisted");
        assert_eq!(reopened.entries()[0].selection.categories, vec!["Projects"]);
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let backend = MemBackend::new();
        let good = SavedSearch {
            id: Uuid::new_v4(),
            name: "good".into(),
            selection: FacetSelection::default(),
            created_at: Utc::now(),
        };
        let raw = format!(
            "[{}, {{\"name\": 42}}]",
            serde_json::to_string(&good).unwrap()
        );
        backend.set(SAVED_SEARCHES_SLOT, &raw).unwrap();

        let store = SavedSearchStore::open(&backend).unwrap();
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].name, "good");
    }

    #[test]
    fn corrupt_slot_yields_empty_store() {
        let backend = MemBackend::new();
        backend.set(SAVED_SEARCHES_SLOT, "not json at all").unwrap();
        let store = SavedSearchStore::open(&backend).unwrap();
        assert!(store.entries().is_empty());
    }
}
