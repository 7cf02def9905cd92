// SPDX-License-Identifier: MPL-2.0
//! Analytics port definition.
//!
//! Analytics are fire-and-forget: [`AnalyticsSink::track`] never blocks and
//! returns nothing, so no viewer transition can depend on it.

use crate::domain::gallery::{ItemId, StoreId};
use chrono::{DateTime, Utc};

/// The named analytics events emitted by the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEventKind {
    /// The gallery section finished loading and was shown.
    SectionViewed,
    /// An item was displayed in the carousel for the first time this session.
    ItemViewed,
    /// The full-screen viewer opened.
    ViewerOpened,
    /// The viewer closed.
    ViewerClosed {
        /// Distinct items seen during the session.
        viewed: usize,
        /// Items available in the session.
        total: usize,
    },
    /// A category was selected.
    CategoryFiltered,
    /// A tag was toggled.
    TagFiltered {
        /// Whether the tag is now selected.
        selected: bool,
    },
    /// The view mode changed.
    ViewModeChanged {
        /// New mode name.
        mode: &'static str,
    },
    /// The current item was handed to the share sheet.
    ItemShared,
}

impl AnalyticsEventKind {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SectionViewed => "gallery_section_viewed",
            Self::ItemViewed => "gallery_item_viewed",
            Self::ViewerOpened => "gallery_viewer_opened",
            Self::ViewerClosed { .. } => "gallery_viewer_closed",
            Self::CategoryFiltered => "gallery_category_filtered",
            Self::TagFiltered { .. } => "gallery_tag_filtered",
            Self::ViewModeChanged { .. } => "gallery_view_mode_changed",
            Self::ItemShared => "gallery_item_shared",
        }
    }
}

/// An analytics event with its common payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub kind: AnalyticsEventKind,
    pub store_id: StoreId,
    pub item_id: Option<ItemId>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub index: Option<usize>,
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(kind: AnalyticsEventKind, store_id: StoreId) -> Self {
        Self {
            kind,
            store_id,
            item_id: None,
            category: None,
            tags: Vec::new(),
            index: None,
            occurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Port for the analytics collaborator.
///
/// Implementations must not block the caller and must swallow their own
/// failures.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: AnalyticsEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_payload() {
        let event = AnalyticsEvent::new(AnalyticsEventKind::ItemViewed, StoreId::new("s1"))
            .with_item(ItemId::from(3u64))
            .with_index(2)
            .with_category("food")
            .with_tags(["veg"]);

        assert_eq!(event.item_id, Some(ItemId::from(3u64)));
        assert_eq!(event.index, Some(2));
        assert_eq!(event.category.as_deref(), Some("food"));
        assert_eq!(event.tags, vec!["veg".to_string()]);
    }

    #[test]
    fn event_names_are_stable() {
        assert_eq!(
            AnalyticsEventKind::ViewerClosed { viewed: 1, total: 2 }.name(),
            "gallery_viewer_closed"
        );
        assert_eq!(
            AnalyticsEventKind::TagFiltered { selected: true }.name(),
            "gallery_tag_filtered"
        );
    }
}
