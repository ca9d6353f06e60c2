//! Local-to-backend track identifier resolution

use cadence_core::{BackendTrackId, CadenceError, CatalogEntry, LocalTrackId, TrackCatalog};
use std::collections::HashMap;
use tracing::debug;

/// Cached `local id -> backend id` lookup
///
/// Resolution never fails loudly: `None` means "do not persist statistics for
/// this track".
#[derive(Debug, Clone, Default)]
pub struct CatalogAdapter {
    entries: HashMap<LocalTrackId, BackendTrackId>,
}

impl CatalogAdapter {
    /// Create an adapter with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter pre-filled with catalog entries
    pub fn with_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut adapter = Self::new();
        adapter.load(entries);
        adapter
    }

    /// Resolve a local id to the identifier statistics are recorded under
    ///
    /// Ids that already have the canonical backend shape are returned as-is.
    pub fn resolve_backend_id(&self, local_id: &LocalTrackId) -> Option<BackendTrackId> {
        if let Some(id) = BackendTrackId::parse_canonical(local_id.as_str()) {
            return Some(id);
        }

        let resolved = self.entries.get(local_id).cloned();
        if resolved.is_none() {
            debug!(local_id = %local_id, "No backend mapping for track");
        }
        resolved
    }

    /// Replace the cache with a fresh catalog fetch
    ///
    /// On failure the previous cache is kept.
    pub fn refresh(&mut self, catalog: &dyn TrackCatalog) -> Result<usize, CadenceError> {
        let entries = catalog.catalog_entries()?;
        self.entries.clear();
        self.load(entries);
        debug!(entries = self.entries.len(), "Track catalog refreshed");
        Ok(self.entries.len())
    }

    /// Add entries to the cache, overwriting existing mappings
    pub fn load(&mut self, entries: impl IntoIterator<Item = CatalogEntry>) {
        self.entries.extend(
            entries
                .into_iter()
                .map(|entry| (entry.local_id, entry.backend_id)),
        );
    }

    /// Drop every cached mapping
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached mappings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
