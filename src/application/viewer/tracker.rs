// SPDX-License-Identifier: MPL-2.0
//! Per-session view deduplication.

use crate::domain::gallery::ItemId;
use std::collections::HashSet;

/// Set of items already counted in the current viewer session.
#[derive(Debug, Clone, Default)]
pub struct ViewedTracker {
    seen: HashSet<ItemId>,
}

impl ViewedTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`; returns `true` only the first time it is seen.
    pub fn add(&mut self, id: &ItemId) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.clone())
    }

    #[must_use]
    pub fn has_seen(&self, id: &ItemId) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
