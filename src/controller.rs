//! # Filter State Controller
//!
//! [`BoardController`] is the single owner of the live [`FacetSelection`],
//! the dirty flag, and the derived visible list. Every facet widget calls a
//! mutator here; nothing else writes filter state.
//!
//! ## Synchronous recompute
//!
//! Each mutator re-runs the predicate engine and the sorter before it
//! returns, so a reader can never observe a selection that disagrees with
//! the visible list. There is no other recompute trigger and no polling.
//!
//! ## Dirty tracking
//!
//! The dirty flag answers one question: has the selection been touched since
//! the last load-from-saved or mark-as-saved event? It is set eagerly by
//! every mutator — even one that re-applies the current value — which keeps
//! the "Save" affordance's enabled state trivially correct. `reset()` counts
//! as clean: an all-empty selection is the implicit saved state.
//!
//! ## Switching saved searches
//!
//! Loading a saved search while dirty would silently destroy the user's
//! edits, so [`BoardController::request_load`] parks the target in a pending
//! slot and reports [`LoadOutcome::NeedsConfirmation`] without touching the
//! live selection. The UI then offers:
//!
//! - **discard** → [`BoardController::resolve_discard`] applies the parked
//!   target;
//! - **save** → the caller runs the save flow against the store and calls
//!   [`BoardController::mark_saved`]; the parked target is dropped and the
//!   user re-initiates the load themselves (the two actions are never
//!   auto-chained);
//! - or the prompt is dismissed via [`BoardController::cancel_pending`].
//!
//! The controller holds the active saved-search id only as a weak reference
//! for highlighting the picker; the store owns the entries. Deleting the
//! active entry must be reported via [`BoardController::saved_deleted`].

use chrono::NaiveDate;
use uuid::Uuid;

use crate::filter::apply_filters;
use crate::model::Post;
use crate::saved::SavedSearch;
use crate::selection::{AccessFilter, FacetSelection};
use crate::sort::{sort_posts, SortMode};

/// What happened to a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The selection was clean; the saved search is now live.
    Applied,
    /// Unsaved changes exist; nothing was mutated and the target is parked
    /// until the user resolves the prompt.
    NeedsConfirmation,
}

pub struct BoardController {
    posts: Vec<Post>,
    selection: FacetSelection,
    sort: SortMode,
    dirty: bool,
    active_saved: Option<Uuid>,
    pending: Option<SavedSearch>,
    visible: Vec<Post>,
}

impl BoardController {
    pub fn new(posts: Vec<Post>) -> Self {
        let mut controller = Self {
            posts,
            selection: FacetSelection::default(),
            sort: SortMode::default(),
            dirty: false,
            active_saved: None,
            pending: None,
            visible: Vec::new(),
        };
        controller.recompute();
        controller
    }

    // --- Read surface ---

    pub fn visible(&self) -> &[Post] {
        &self.visible
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn active_saved(&self) -> Option<Uuid> {
        self.active_saved
    }

    pub fn pending_target(&self) -> Option<&SavedSearch> {
        self.pending.as_ref()
    }

    // --- Facet mutators ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.query = query.into();
        self.touch();
    }

    pub fn toggle_category(&mut self, name: &str, on: bool) {
        self.selection.toggle_category(name, on);
        self.touch();
    }

    pub fn toggle_sector(&mut self, name: &str, on: bool) {
        self.selection.toggle_sector(name, on);
        self.touch();
    }

    pub fn toggle_tag(&mut self, name: &str, on: bool) {
        self.selection.toggle_tag(name, on);
        self.touch();
    }

    pub fn set_access(&mut self, access: AccessFilter) {
        self.selection.access = access;
        self.touch();
    }

    pub fn set_date_from(&mut self, date: Option<NaiveDate>) {
        self.selection.date_from = date;
        self.touch();
    }

    pub fn set_date_to(&mut self, date: Option<NaiveDate>) {
        self.selection.date_to = date;
        self.touch();
    }

    /// Clear every facet. The empty selection counts as clean.
    pub fn reset(&mut self) {
        self.selection = FacetSelection::default();
        self.dirty = false;
        self.active_saved = None;
        self.recompute();
    }

    // --- Sort and input collection (not part of the saved snapshot) ---

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.recompute();
    }

    /// Swap the raw post collection, e.g. after the supplier refreshed it.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.recompute();
    }

    // --- Saved-search protocol ---

    /// Load `saved`, or park it behind a confirmation when dirty.
    pub fn request_load(&mut self, saved: &SavedSearch) -> LoadOutcome {
        if self.dirty {
            self.pending = Some(saved.clone());
            LoadOutcome::NeedsConfirmation
        } else {
            self.load_saved(saved);
            LoadOutcome::Applied
        }
    }

    /// Overwrite the whole selection from a snapshot. Atomic from the
    /// outside: the visible list is recomputed before this returns.
    pub fn load_saved(&mut self, saved: &SavedSearch) {
        self.selection = saved.selection.clone();
        self.active_saved = Some(saved.id);
        self.dirty = false;
        self.pending = None;
        self.recompute();
    }

    /// The current selection was just persisted under `id`; facet values are
    /// untouched.
    pub fn mark_saved(&mut self, id: Uuid) {
        self.dirty = false;
        self.active_saved = Some(id);
        self.pending = None;
    }

    /// Apply the parked load. Returns `false` when nothing was pending.
    pub fn resolve_discard(&mut self) -> bool {
        match self.pending.take() {
            Some(target) => {
                self.load_saved(&target);
                true
            }
            None => false,
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// The store deleted an entry; drop any weak references to it.
    pub fn saved_deleted(&mut self, id: Uuid) {
        if self.active_saved == Some(id) {
            self.active_saved = None;
        }
        if self.pending.as_ref().is_some_and(|p| p.id == id) {
            self.pending = None;
        }
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.recompute();
    }

    fn recompute(&mut self) {
        let filtered = apply_filters(&self.posts, &self.selection);
        self.visible = sort_posts(&filtered, self.sort);
    }
}
