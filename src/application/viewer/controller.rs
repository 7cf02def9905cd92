// SPDX-License-Identifier: MPL-2.0
//! Viewer controller: the full-screen carousel state machine.
//!
//! The controller is driven from the host's event loop through `&mut self`.
//! Everything asynchronous (view tracking, sharing, cache warming) is spawned
//! on the tokio runtime and reports back as a [`ViewerMessage`] tagged with
//! the session it was started in. Messages from a closed session are
//! discarded.

use super::input::ViewerCommand;
use super::state::{MediaStatus, SessionId, ViewerSnapshot, ViewerState};
use crate::application::port::{
    AnalyticsEvent, AnalyticsEventKind, ServiceError, ShareError, ShareOutcome, ShareRequest,
};
use crate::application::Collaborators;
use crate::config::Config;
use crate::domain::gallery::{GalleryItem, ItemId, StoreId};
use crate::domain::ui::ViewMode;
use crate::error::{Error, Result};
use crate::media::prefetch::{PrefetchConfig, PrefetchController};
use crate::ui::state::{
    spawn_gesture_worker, DisplayArea, GestureHandle, GestureInput, Size, TransformOptions,
    TransformSnapshot,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Share text used when the item has no title.
pub const DEFAULT_SHARE_MESSAGE: &str = "Take a look at this!";

// =============================================================================
// Options
// =============================================================================

/// Tunables of a viewer instance.
#[derive(Debug, Clone, Copy)]
pub struct ViewerOptions {
    pub info_fade: Duration,
    pub prefetch: PrefetchConfig,
    pub transform: TransformOptions,
    /// Logical size of the media area.
    pub viewport: Size,
}

impl ViewerOptions {
    #[must_use]
    pub fn from_config(config: &Config, viewport: Size) -> Self {
        Self {
            info_fade: Duration::from_millis(config.viewer.info_fade_ms),
            prefetch: PrefetchConfig::from(&config.prefetch),
            transform: TransformOptions::from(&config.gesture),
            viewport,
        }
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), Size::default())
    }
}

// =============================================================================
// Messages and results
// =============================================================================

/// Completion of an asynchronous collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerMessage {
    ViewCountResolved {
        session: SessionId,
        item_id: ItemId,
        result: std::result::Result<Option<u64>, ServiceError>,
    },
    ShareFinished {
        session: SessionId,
        item_id: ItemId,
        result: std::result::Result<ShareOutcome, ShareError>,
    },
}

impl ViewerMessage {
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            Self::ViewCountResolved { session, .. } | Self::ShareFinished { session, .. } => {
                *session
            }
        }
    }
}

/// What handling a message did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// State or analytics changed.
    Applied,
    /// Current session, but nothing to update (no count, dismissed share, failure).
    Ignored,
    /// Stale session or closed viewer.
    Discarded,
}

/// Info overlay visibility change, with the fade the renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoTransition {
    pub visible: bool,
    pub fade: Duration,
}

/// Result of closing the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSummary {
    pub session: SessionId,
    pub viewed: usize,
    pub total: usize,
}

// =============================================================================
// Controller
// =============================================================================

/// Drives the full-screen viewer over a read-only item collection.
pub struct ViewerController {
    store_id: StoreId,
    items: Arc<[GalleryItem]>,
    collaborators: Collaborators,
    options: ViewerOptions,

    /// `Some` while the viewer is open.
    state: Option<ViewerState>,

    prefetch: PrefetchController,
    gesture: Option<GestureHandle>,

    last_session: SessionId,
    sender: mpsc::UnboundedSender<ViewerMessage>,
    inbox: mpsc::UnboundedReceiver<ViewerMessage>,
}

impl ViewerController {
    #[must_use]
    pub fn new(
        store_id: StoreId,
        items: Arc<[GalleryItem]>,
        collaborators: Collaborators,
        options: ViewerOptions,
    ) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let prefetch = PrefetchController::new(options.prefetch, collaborators.image_cache.clone());
        Self {
            store_id,
            items,
            collaborators,
            options,
            state: None,
            prefetch,
            gesture: None,
            last_session: SessionId::new(0),
            sender,
            inbox,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn items(&self) -> &Arc<[GalleryItem]> {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn state(&self) -> Option<&ViewerState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(ViewerState::current_index)
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&GalleryItem> {
        self.current_index().and_then(|index| self.items.get(index))
    }

    #[must_use]
    pub fn session(&self) -> Option<SessionId> {
        self.state.as_ref().map(ViewerState::session)
    }

    #[must_use]
    pub fn prefetch(&self) -> &PrefetchController {
        &self.prefetch
    }

    /// Latest transform of the displayed image; rest while closed.
    #[must_use]
    pub fn transform(&self) -> TransformSnapshot {
        self.gesture
            .as_ref()
            .map_or(TransformSnapshot::REST, GestureHandle::latest)
    }

    /// Gesture worker of the open session, for renderers subscribing to transforms.
    #[must_use]
    pub fn gesture(&self) -> Option<&GestureHandle> {
        self.gesture.as_ref()
    }

    /// Immutable view of the open viewer.
    #[must_use]
    pub fn snapshot(&self) -> Option<ViewerSnapshot> {
        let state = self.state.as_ref()?;
        let item = self.items.get(state.current_index)?;
        Some(ViewerSnapshot {
            session: state.session,
            index: state.current_index,
            total: self.items.len(),
            mode: state.mode,
            info_visible: state.info_visible,
            item: item.clone(),
            view_count: state.view_count(item),
            media: state.media_status(item.id()),
            has_previous: state.current_index > 0,
            has_next: state.current_index + 1 < self.items.len(),
            viewed: state.tracker.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Opens the viewer at `initial_index`, clamped into range.
    ///
    /// Opening an already open viewer starts a new session.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGallery`] if there is nothing to show.
    pub fn open(&mut self, initial_index: usize) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::EmptyGallery);
        }
        if self.is_open() {
            self.close();
        }

        let index = initial_index.min(self.items.len() - 1);
        let session = self.last_session.next();
        self.last_session = session;
        self.state = Some(ViewerState::new(session, index));
        self.gesture = Some(spawn_gesture_worker(
            self.options.transform,
            DisplayArea::fallback(self.options.viewport),
        ));

        tracing::debug!(%session, index, total = self.items.len(), "viewer opened");
        self.emit_for_index(AnalyticsEventKind::ViewerOpened, index);
        self.on_index_changed(index);
        Ok(())
    }

    /// Settles the carousel on `index`.
    ///
    /// Returns `false` if the viewer is closed, `index` is out of range, or
    /// already current.
    pub fn scroll_settle(&mut self, index: usize) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if index >= self.items.len() || index == state.current_index {
            return false;
        }
        state.current_index = index;
        self.on_index_changed(index);
        true
    }

    /// Moves forward; a no-op at the last item.
    pub fn next(&mut self) -> bool {
        match self.current_index() {
            Some(index) if index + 1 < self.items.len() => self.scroll_settle(index + 1),
            _ => false,
        }
    }

    /// Moves back; a no-op at the first item.
    pub fn previous(&mut self) -> bool {
        match self.current_index() {
            Some(index) if index > 0 => self.scroll_settle(index - 1),
            _ => false,
        }
    }

    pub fn toggle_info(&mut self) -> Option<InfoTransition> {
        let state = self.state.as_mut()?;
        state.info_visible = !state.info_visible;
        Some(InfoTransition {
            visible: state.info_visible,
            fade: self.options.info_fade,
        })
    }

    /// Switches between carousel and grid, returning the new mode.
    pub fn toggle_view_mode(&mut self) -> Option<ViewMode> {
        let state = self.state.as_mut()?;
        state.mode = match state.mode {
            ViewMode::Carousel => ViewMode::Grid,
            ViewMode::Grid | ViewMode::Categories => ViewMode::Carousel,
        };
        let mode = state.mode;
        self.collaborators.emit(
            AnalyticsEvent::new(
                AnalyticsEventKind::ViewModeChanged {
                    mode: mode.as_str(),
                },
                self.store_id.clone(),
            )
            .with_index(state.current_index),
        );
        Some(mode)
    }

    /// Selects a grid thumbnail: makes it current and returns to the carousel.
    pub fn select_thumbnail(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        state.mode = ViewMode::Carousel;
        if index != state.current_index {
            self.scroll_settle(index);
        }
        true
    }

    /// Closes the viewer and tears down its session.
    ///
    /// Outstanding prefetches are aborted; late collaborator results for the
    /// session are discarded when they arrive.
    pub fn close(&mut self) -> Option<ViewerSummary> {
        let state = self.state.take()?;
        let summary = ViewerSummary {
            session: state.session,
            viewed: state.tracker.len(),
            total: self.items.len(),
        };

        self.collaborators.emit(
            AnalyticsEvent::new(
                AnalyticsEventKind::ViewerClosed {
                    viewed: summary.viewed,
                    total: summary.total,
                },
                self.store_id.clone(),
            )
            .with_index(state.current_index),
        );

        self.prefetch.cancel_all();
        self.prefetch.clear();
        if let Some(gesture) = self.gesture.take() {
            gesture.shutdown();
        }

        tracing::debug!(
            session = %summary.session,
            viewed = summary.viewed,
            total = summary.total,
            "viewer closed"
        );
        Some(summary)
    }

    /// Routes a keyboard/pointer command to its transition.
    ///
    /// Returns whether anything changed.
    pub fn dispatch(&mut self, command: ViewerCommand) -> bool {
        match command {
            ViewerCommand::Previous => self.previous(),
            ViewerCommand::Next => self.next(),
            ViewerCommand::Close => self.close().is_some(),
            ViewerCommand::ToggleInfo => self.toggle_info().is_some(),
            ViewerCommand::ToggleViewMode => self.toggle_view_mode().is_some(),
        }
    }

    /// Forwards a recognizer input to the gesture worker.
    pub fn gesture_input(&self, input: GestureInput) {
        if let Some(gesture) = &self.gesture {
            gesture.send(input);
        }
    }

    // -------------------------------------------------------------------------
    // Media status
    // -------------------------------------------------------------------------

    /// Records the natural size of an item's media.
    pub fn media_loaded(&mut self, id: &ItemId, width: u32, height: u32) {
        self.set_media_status(id, MediaStatus::Loaded { width, height });
    }

    /// Records a load failure scoped to one item.
    pub fn media_failed(&mut self, id: &ItemId) {
        tracing::debug!(item = %id, "media failed to load");
        self.set_media_status(id, MediaStatus::Failed);
    }

    /// Updates the media area size (rotation, window resize).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.options.viewport = viewport;
        self.sync_display_area();
    }

    fn set_media_status(&mut self, id: &ItemId, status: MediaStatus) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.media.insert(id.clone(), status);
        let is_current = self
            .items
            .get(state.current_index)
            .is_some_and(|item| item.id() == id);
        if is_current {
            self.sync_display_area();
        }
    }

    fn sync_display_area(&self) {
        let (Some(state), Some(gesture)) = (self.state.as_ref(), self.gesture.as_ref()) else {
            return;
        };
        let Some(item) = self.items.get(state.current_index) else {
            return;
        };
        gesture.set_display_area(self.display_area_for(state.media_status(item.id())));
    }

    #[allow(clippy::cast_precision_loss)]
    fn display_area_for(&self, status: MediaStatus) -> DisplayArea {
        let natural = match status {
            MediaStatus::Loaded { width, height } => Some(Size::new(width as f32, height as f32)),
            MediaStatus::Loading | MediaStatus::Failed => None,
        };
        DisplayArea::resolve(self.options.viewport, natural)
    }

    // -------------------------------------------------------------------------
    // Share
    // -------------------------------------------------------------------------

    /// Hands the current item to the share sheet.
    ///
    /// Returns `false` if the viewer is closed. The outcome arrives later as a
    /// [`ViewerMessage::ShareFinished`].
    pub fn share(&mut self) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        let Some(item) = self.items.get(state.current_index) else {
            return false;
        };

        let request = ShareRequest {
            message: item.title().unwrap_or(DEFAULT_SHARE_MESSAGE).to_string(),
            media_url: item.url().to_string(),
        };
        let session = state.session;
        let item_id = item.id().clone();
        let share = self.collaborators.share.share(request);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = share.await;
            // The receiver lives as long as the controller.
            let _ = sender.send(ViewerMessage::ShareFinished {
                session,
                item_id,
                result,
            });
        });
        true
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Applies one collaborator result.
    pub fn handle_message(&mut self, message: ViewerMessage) -> MessageOutcome {
        let is_current = self
            .state
            .as_ref()
            .is_some_and(|state| state.session == message.session());
        if !is_current {
            tracing::trace!(session = %message.session(), "stale viewer message discarded");
            return MessageOutcome::Discarded;
        }

        match message {
            ViewerMessage::ViewCountResolved {
                item_id, result, ..
            } => self.apply_view_count(item_id, result),
            ViewerMessage::ShareFinished {
                item_id, result, ..
            } => self.apply_share_result(item_id, result),
        }
    }

    /// Applies every message already delivered, without waiting.
    ///
    /// Returns the number of messages applied (not ignored or discarded).
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.inbox.try_recv() {
            if self.handle_message(message) == MessageOutcome::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next collaborator result and applies it.
    pub async fn next_message(&mut self) -> Option<MessageOutcome> {
        let message = self.inbox.recv().await?;
        Some(self.handle_message(message))
    }

    fn apply_view_count(
        &mut self,
        item_id: ItemId,
        result: std::result::Result<Option<u64>, ServiceError>,
    ) -> MessageOutcome {
        let Some(state) = self.state.as_mut() else {
            return MessageOutcome::Discarded;
        };
        match result {
            Ok(Some(count)) if count > 0 => {
                tracing::trace!(item = %item_id, count, "view count updated");
                state.view_counts.insert(item_id, count);
                MessageOutcome::Applied
            }
            Ok(_) => MessageOutcome::Ignored,
            Err(error) => {
                tracing::debug!(
                    item = %item_id,
                    %error,
                    "view tracking failed, keeping last count"
                );
                MessageOutcome::Ignored
            }
        }
    }

    fn apply_share_result(
        &mut self,
        item_id: ItemId,
        result: std::result::Result<ShareOutcome, ShareError>,
    ) -> MessageOutcome {
        match result {
            Ok(ShareOutcome::Shared) => {
                let index = self.current_index();
                let mut event =
                    AnalyticsEvent::new(AnalyticsEventKind::ItemShared, self.store_id.clone())
                        .with_item(item_id);
                if let Some(index) = index {
                    event = event.with_index(index);
                }
                self.collaborators.emit(event);
                MessageOutcome::Applied
            }
            Ok(ShareOutcome::Dismissed) => MessageOutcome::Ignored,
            Err(error) => {
                tracing::debug!(item = %item_id, %error, "share failed");
                MessageOutcome::Ignored
            }
        }
    }

    // -------------------------------------------------------------------------
    // Index side effects
    // -------------------------------------------------------------------------

    fn on_index_changed(&mut self, index: usize) {
        self.track_view(index);
        self.prefetch.recompute(index, &self.items);
        if let Some(gesture) = &self.gesture {
            gesture.reset();
        }
        self.sync_display_area();
    }

    /// Counts a view at most once per session.
    fn track_view(&mut self, index: usize) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(item) = self.items.get(index) else {
            return;
        };
        if !state.tracker.add(item.id()) {
            return;
        }

        let optimistic = state.view_count(item).saturating_add(1);
        state.view_counts.insert(item.id().clone(), optimistic);

        let session = state.session;
        let item_id = item.id().clone();
        let request = self.collaborators.gallery.track_view(&self.store_id, &item_id);
        let sender = self.sender.clone();

        self.emit_for_index(AnalyticsEventKind::ItemViewed, index);

        tokio::spawn(async move {
            let result = request.await;
            // The receiver lives as long as the controller.
            let _ = sender.send(ViewerMessage::ViewCountResolved {
                session,
                item_id,
                result,
            });
        });
    }

    fn emit_for_index(&self, kind: AnalyticsEventKind, index: usize) {
        let mut event = AnalyticsEvent::new(kind, self.store_id.clone()).with_index(index);
        if let Some(item) = self.items.get(index) {
            event = event
                .with_item(item.id().clone())
                .with_category(item.category());
        }
        self.collaborators.emit(event);
    }
}

impl std::fmt::Debug for ViewerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerController")
            .field("store_id", &self.store_id)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("prefetch", &self.prefetch)
            .finish_non_exhaustive()
    }
}

impl Drop for ViewerController {
    fn drop(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            gesture.shutdown();
        }
    }
}
