//! Process-wide memo of resolved site ids

use std::collections::HashMap;

use domain::StopId;
use parking_lot::RwLock;

/// Map from the literal destination name to its resolved stop id
///
/// Entries live for the lifetime of the process. Keys are not normalised, so
/// `"Slussen"` and `"slussen"` are cached separately.
#[derive(Debug, Default)]
pub struct SiteIdCache {
    entries: RwLock<HashMap<String, StopId>>,
}

impl SiteIdCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached id for `name`
    pub fn get(&self, name: &str) -> Option<StopId> {
        self.entries.read().get(name).cloned()
    }

    /// Remember the id for `name`
    pub fn insert(&self, name: impl Into<String>, id: StopId) {
        self.entries.write().insert(name.into(), id);
    }

    /// Number of cached names
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Forget all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
