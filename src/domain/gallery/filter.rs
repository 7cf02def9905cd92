// SPDX-License-Identifier: MPL-2.0
//! Category and tag filtering for the domain layer.
//!
//! # Available Filters
//!
//! - [`CategorySelection`]: Single-select category (or all categories)
//! - [`FilterSelection`]: Category plus a multi-select tag set, combined with AND logic
//!
//! Matching is case-insensitive through `str::to_lowercase`. Whitespace and
//! Unicode normalization are not applied.

use super::GalleryItem;
use std::collections::BTreeSet;

// =============================================================================
// Category Selection
// =============================================================================

/// Category part of a filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// Every category matches.
    #[default]
    All,
    /// Only items whose category equals the name (case-insensitive).
    Named(String),
}

impl CategorySelection {
    /// Parses a user-facing category name; `"all"` (any case) selects everything.
    ///
    /// A real category spelled "all" must be built as [`CategorySelection::Named`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name.to_lowercase() == category.to_lowercase(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}

// =============================================================================
// Filter Selection
// =============================================================================

/// Combined category and tag filter.
///
/// Selected tags are stored lowercased. With any tag selected, an item must
/// carry every selected tag; an item without tags never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub category: CategorySelection,
    tags: BTreeSet<String>,
}

impl FilterSelection {
    /// Creates a selection with no active criteria (matches every item).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: CategorySelection) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect();
        self
    }

    /// Selected tags, lowercased.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    /// Adds the tag if absent, removes it otherwise. Returns `true` if it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let key = tag.to_lowercase();
        if self.tags.remove(&key) {
            false
        } else {
            self.tags.insert(key);
            true
        }
    }

    /// Returns `true` if any criterion is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_active() || !self.tags.is_empty()
    }

    /// Returns the number of active criteria (the category counts once, each tag once).
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(self.category.is_active()) + self.tags.len()
    }

    /// Resets the category to all and empties the tag set.
    pub fn clear(&mut self) {
        self.category = CategorySelection::All;
        self.tags.clear();
    }

    /// Returns `true` if the item passes both the category and the tag criteria.
    #[must_use]
    pub fn matches(&self, item: &GalleryItem) -> bool {
        if !self.category.matches(item.category()) {
            return false;
        }
        if self.tags.is_empty() {
            return true;
        }
        let item_tags = item.tags();
        if item_tags.is_empty() {
            return false;
        }
        let lowered: BTreeSet<String> = item_tags.iter().map(|t| t.to_lowercase()).collect();
        self.tags.is_subset(&lowered)
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Returns the positions in `items` of every item matching the selection, in order.
#[must_use]
pub fn filter_indices(items: &[GalleryItem], selection: &FilterSelection) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| selection.matches(item))
        .map(|(index, _)| index)
        .collect()
}

/// Returns the matching items, preserving input order.
#[must_use]
pub fn filter_items<'a>(
    items: &'a [GalleryItem],
    selection: &FilterSelection,
) -> Vec<&'a GalleryItem> {
    items.iter().filter(|item| selection.matches(item)).collect()
}

/// Computes the tags offered to the user from the full, unfiltered collection.
///
/// Tags are deduplicated case-insensitively (the first spelling wins) and
/// sorted by their lowercase form.
#[must_use]
pub fn tag_universe(items: &[GalleryItem]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut tags: Vec<(String, String)> = Vec::new();
    for tag in items.iter().flat_map(|item| item.tags().iter()) {
        let key = tag.to_lowercase();
        if seen.insert(key.clone()) {
            tags.push((key, tag.clone()));
        }
    }
    tags.sort_by(|a, b| a.0.cmp(&b.0));
    tags.into_iter().map(|(_, tag)| tag).collect()
}

// =============================================================================
// Tests
// =============================================================================
