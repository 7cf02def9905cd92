// SPDX-License-Identifier: MPL-2.0
//! Per-session viewer state and the snapshot handed to the renderer.

use super::tracker::ViewedTracker;
use crate::domain::gallery::{GalleryItem, ItemId};
use crate::domain::ui::ViewMode;
use std::collections::HashMap;
use std::fmt;

/// Identifies one open/close cycle of the viewer.
///
/// Asynchronous results carry the session they were started in; results from
/// an earlier session are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Load status of one item's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaStatus {
    #[default]
    Loading,
    Loaded {
        width: u32,
        height: u32,
    },
    /// Scoped to this item; navigation continues.
    Failed,
}

/// State owned exclusively by the viewer controller while the viewer is open.
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub(crate) session: SessionId,
    pub(crate) current_index: usize,
    pub(crate) mode: ViewMode,
    pub(crate) info_visible: bool,
    pub(crate) tracker: ViewedTracker,
    pub(crate) view_counts: HashMap<ItemId, u64>,
    pub(crate) media: HashMap<ItemId, MediaStatus>,
}

impl ViewerState {
    /// A fresh session showing `index` in the carousel with info visible.
    #[must_use]
    pub fn new(session: SessionId, index: usize) -> Self {
        Self {
            session,
            current_index: index,
            mode: ViewMode::Carousel,
            info_visible: true,
            tracker: ViewedTracker::new(),
            view_counts: HashMap::new(),
            media: HashMap::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    #[must_use]
    pub fn tracker(&self) -> &ViewedTracker {
        &self.tracker
    }

    /// Last known view count: the session value if any, else the fetched one.
    #[must_use]
    pub fn view_count(&self, item: &GalleryItem) -> u64 {
        self.view_counts
            .get(item.id())
            .copied()
            .unwrap_or_else(|| item.views())
    }

    #[must_use]
    pub fn media_status(&self, id: &ItemId) -> MediaStatus {
        self.media.get(id).copied().unwrap_or_default()
    }
}

/// Immutable view of the open viewer, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub session: SessionId,
    pub index: usize,
    pub total: usize,
    pub mode: ViewMode,
    pub info_visible: bool,
    pub item: GalleryItem,
    pub view_count: u64,
    pub media: MediaStatus,
    pub has_previous: bool,
    pub has_next: bool,
    /// Distinct items seen so far this session.
    pub viewed: usize,
}
