//! Tabbed snippet viewer state.
//!
//! [`ViewerState`] is an immutable value: every transition returns a new state
//! and leaves the old one untouched. The catalog is shared behind an `Arc`, so
//! cloning a state is cheap.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{Snippet, SnippetCatalog};
use crate::error::{CatalogError, SelectionError};
use crate::highlighting::{self, Rendering};

/// Which snippet of a catalog is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    catalog: Arc<SnippetCatalog>,
    active: usize,
}

impl ViewerState {
    /// Start on `default_key`, which must exist in the catalog.
    pub fn initialize(catalog: SnippetCatalog, default_key: &str) -> Result<Self, CatalogError> {
        Self::with_shared(Arc::new(catalog), default_key)
    }

    /// Same as [`ViewerState::initialize`] for an already shared catalog.
    pub fn with_shared(
        catalog: Arc<SnippetCatalog>,
        default_key: &str,
    ) -> Result<Self, CatalogError> {
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        let active = catalog
            .position(default_key)
            .ok_or_else(|| CatalogError::UnknownDefault(default_key.to_string()))?;
        debug!(default_key, tabs = catalog.len(), "viewer initialized");
        Ok(Self { catalog, active })
    }

    /// Start on the first snippet of the catalog.
    pub fn first(catalog: SnippetCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            active: 0,
        }
    }

    pub fn catalog(&self) -> &SnippetCatalog {
        &self.catalog
    }

    pub fn active_key(&self) -> &str {
        &self.active_snippet().key
    }

    /// Position of the active tab in catalog order.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_snippet(&self) -> &Snippet {
        // `active` is only ever set from a catalog position.
        &self.catalog.as_slice()[self.active]
    }

    /// Tokenize the active snippet. Other snippets are never touched.
    pub fn render_active(&self) -> Rendering<'_> {
        highlighting::render(self.active_snippet())
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active_key() == key
    }

    /// Switch to the snippet with `key`.
    pub fn select_tab(&self, key: &str) -> Result<Self, SelectionError> {
        let active = self
            .catalog
            .position(key)
            .ok_or_else(|| SelectionError::UnknownKey(key.to_string()))?;
        Ok(self.with_active(active))
    }

    /// Switch to `key`, or keep the current tab if the key is unknown.
    pub fn select_tab_or_keep(&self, key: &str) -> Self {
        self.select_tab(key).unwrap_or_else(|e| {
            warn!(error = %e, active = self.active_key(), "ignoring tab selection");
            self.clone()
        })
    }

    /// Switch to the tab at `index` (0-based).
    pub fn select_index(&self, index: usize) -> Result<Self, SelectionError> {
        if index >= self.catalog.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        Ok(self.with_active(index))
    }

    /// Next tab in catalog order, wrapping around.
    pub fn select_next(&self) -> Self {
        self.with_active((self.active + 1) % self.catalog.len())
    }

    /// Previous tab in catalog order, wrapping around.
    pub fn select_previous(&self) -> Self {
        let len = self.catalog.len();
        self.with_active((self.active + len - 1) % len)
    }

    fn with_active(&self, active: usize) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;

    fn two_tabs() -> SnippetCatalog {
        SnippetCatalog::new(vec![
            Snippet::new("db", "Database", "typescript", "initAppDb({})"),
            Snippet::new("events", "Events", "typescript", "regEvent('x', () => {})"),
        ])
        .unwrap()
    }

    #[test]
    fn test_initialize_on_default() {
        let state = ViewerState::initialize(two_tabs(), "db").unwrap();
        assert_eq!(state.active_key(), "db");
        assert_eq!(state.active_snippet().label, "Database");
    }

    #[test]
    fn test_initialize_unknown_default() {
        let err = ViewerState::initialize(two_tabs(), "nope").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefault(ref k) if k == "nope"));
    }

    #[test]
    fn test_select_and_reject() {
        let state = ViewerState::initialize(two_tabs(), "db").unwrap();
        let state = state.select_tab("events").unwrap();
        assert_eq!(state.active_snippet().key, "events");

        assert_eq!(
            state.select_tab("missing"),
            Err(SelectionError::UnknownKey("missing".to_string()))
        );
        let kept = state.select_tab_or_keep("missing");
        assert_eq!(kept.active_key(), "events");
    }

    #[test]
    fn test_select_does_not_mutate_original() {
        let original = ViewerState::initialize(two_tabs(), "db").unwrap();
        let _next = original.select_tab("events").unwrap();
        assert_eq!(original.active_key(), "db");
    }

    #[test]
    fn test_cycling_wraps() {
        let catalog = SnippetCatalog::builtin(CatalogKind::Showcase).unwrap();
        let len = catalog.len();
        let start = ViewerState::initialize(catalog, "db").unwrap();

        let mut state = start.clone();
        for _ in 0..len {
            state = state.select_next();
        }
        assert_eq!(state, start);

        assert_eq!(start.select_previous().active_key(), "view");
        assert_eq!(start.select_next().active_key(), "events");
    }

    #[test]
    fn test_select_index_bounds() {
        let state = ViewerState::first(two_tabs());
        assert_eq!(state.select_index(1).unwrap().active_key(), "events");
        assert_eq!(
            state.select_index(2),
            Err(SelectionError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_round_trip_restores_rendering() {
        let state = ViewerState::initialize(two_tabs(), "db").unwrap();
        let before = state.render_active().collect_lines();
        let back = state
            .select_tab("events")
            .unwrap()
            .select_tab("db")
            .unwrap();
        assert_eq!(back.render_active().collect_lines(), before);
    }
}
