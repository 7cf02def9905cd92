// SPDX-License-Identifier: MPL-2.0
//! Gallery section: loading, filtering and entry into the viewer.
//!
//! The section owns the full item collection as an `Arc<[GalleryItem]>`.
//! Filters only ever produce index lists over it; the viewer receives either
//! the full collection (no filter active) or the filtered subset.

use crate::application::port::{AnalyticsEvent, AnalyticsEventKind, GalleryQuery, ServiceError};
use crate::application::retry::{fetch_with_retry, RetryPolicy};
use crate::application::viewer::{ViewerController, ViewerOptions};
use crate::application::Collaborators;
use crate::config::Config;
use crate::domain::gallery::{
    filter_indices, tag_universe, CategorySelection, FilterSelection, GalleryCategory, GalleryItem,
    StoreId,
};
use crate::domain::ui::ViewMode;
use crate::error::{Error, Result};
use crate::ui::state::Size;
use futures_util::future;
use std::sync::Arc;

/// Progress of the critical gallery + category load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Automatic retries are exhausted; a manual retry is offered.
    Failed { error: ServiceError, attempts: u32 },
}

impl LoadState {
    /// Whether the manual retry affordance should be shown.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// One store's gallery, as shown on its page.
pub struct GallerySection {
    store_id: StoreId,
    collaborators: Collaborators,
    retry: RetryPolicy,
    query: GalleryQuery,
    viewer_options: ViewerOptions,

    load_state: LoadState,
    items: Arc<[GalleryItem]>,
    categories: Vec<GalleryCategory>,
    /// Computed once per load from the unfiltered items.
    tags: Vec<String>,

    selection: FilterSelection,
    view_mode: ViewMode,
    filtered: Vec<usize>,
}

impl GallerySection {
    #[must_use]
    pub fn new(store_id: StoreId, collaborators: Collaborators, config: &Config) -> Self {
        Self {
            store_id,
            collaborators,
            retry: RetryPolicy::from(&config.retry),
            query: GalleryQuery::from(&config.gallery),
            viewer_options: ViewerOptions::from_config(config, Size::default()),
            load_state: LoadState::Idle,
            items: Arc::from(Vec::new()),
            categories: Vec::new(),
            tags: Vec::new(),
            selection: FilterSelection::new(),
            view_mode: ViewMode::Categories,
            filtered: Vec::new(),
        }
    }

    /// Sets the media area size handed to viewers opened from this section.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewer_options.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Fetches items and categories concurrently, each with bounded retries.
    ///
    /// Categories are derived from the items when the service returns none.
    ///
    /// # Errors
    ///
    /// Returns the last [`ServiceError`] once either fetch has exhausted its
    /// attempts. The section is then in [`LoadState::Failed`].
    pub async fn load(&mut self) -> Result<()> {
        self.load_state = LoadState::Loading;
        tracing::debug!(store = %self.store_id, "loading gallery");

        let gallery = self.collaborators.gallery.clone();
        let store = self.store_id.clone();
        let query = self.query;

        let items = fetch_with_retry(self.retry, "gallery", |_| gallery.get_gallery(&store, query));
        let categories =
            fetch_with_retry(self.retry, "categories", |_| gallery.get_categories(&store));

        match future::join(items, categories).await {
            (Ok(items), Ok(categories)) => {
                self.apply_loaded(items, categories);
                Ok(())
            }
            (Err(exhausted), _) | (_, Err(exhausted)) => {
                self.load_state = LoadState::Failed {
                    error: exhausted.last_error.clone(),
                    attempts: exhausted.attempts,
                };
                Err(Error::Service(exhausted.last_error))
            }
        }
    }

    /// Re-runs the same resilient load after a failure.
    ///
    /// Returns `Ok(false)` without fetching when there is nothing to retry.
    ///
    /// # Errors
    ///
    /// Same as [`GallerySection::load`].
    pub async fn retry(&mut self) -> Result<bool> {
        if !self.load_state.can_retry() {
            return Ok(false);
        }
        tracing::info!(store = %self.store_id, "manual gallery retry");
        self.load().await.map(|()| true)
    }

    fn apply_loaded(&mut self, items: Vec<GalleryItem>, categories: Vec<GalleryCategory>) {
        let categories = if categories.is_empty() {
            GalleryCategory::derive_from(&items)
        } else {
            categories
        };
        self.items = Arc::from(items);
        self.tags = tag_universe(&self.items);
        self.categories = categories;
        self.load_state = LoadState::Ready;
        self.refilter();

        tracing::info!(
            store = %self.store_id,
            items = self.items.len(),
            categories = self.categories.len(),
            "gallery loaded"
        );
        self.collaborators.emit(AnalyticsEvent::new(
            AnalyticsEventKind::SectionViewed,
            self.store_id.clone(),
        ));
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The full, unfiltered collection.
    #[must_use]
    pub fn items(&self) -> &Arc<[GalleryItem]> {
        &self.items
    }

    #[must_use]
    pub fn categories(&self) -> &[GalleryCategory] {
        &self.categories
    }

    /// Tags offered in the chooser, from the unfiltered collection.
    #[must_use]
    pub fn tag_universe(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Positions of the filtered items in [`GallerySection::items`].
    #[must_use]
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    #[must_use]
    pub fn filtered_items(&self) -> Vec<&GalleryItem> {
        self.filtered.iter().filter_map(|&i| self.items.get(i)).collect()
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    /// Selects a category (`"all"` clears the category criterion) and shows the grid.
    ///
    /// Use [`GallerySection::set_category`] with [`CategorySelection::Named`]
    /// for a category that is itself called "all".
    pub fn select_category(&mut self, name: &str) {
        self.set_category(CategorySelection::from_name(name));
    }

    /// Clears the category criterion and shows the grid.
    pub fn select_all_categories(&mut self) {
        self.set_category(CategorySelection::All);
    }

    /// Applies a category selection and shows the grid.
    pub fn set_category(&mut self, category: CategorySelection) {
        let label = match &category {
            CategorySelection::All => "all".to_string(),
            CategorySelection::Named(name) => name.clone(),
        };
        self.selection.category = category;
        self.view_mode = ViewMode::Grid;
        self.refilter();
        self.collaborators.emit(
            AnalyticsEvent::new(AnalyticsEventKind::CategoryFiltered, self.store_id.clone())
                .with_category(label),
        );
    }

    /// Toggles a tag and shows the grid. Returns `true` if the tag is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let selected = self.selection.toggle_tag(tag);
        self.view_mode = ViewMode::Grid;
        self.refilter();
        self.collaborators.emit(
            AnalyticsEvent::new(
                AnalyticsEventKind::TagFiltered { selected },
                self.store_id.clone(),
            )
            .with_tags([tag]),
        );
        selected
    }

    /// Resets category and tags and returns to the category cards.
    pub fn clear_filters(&mut self) {
        self.selection.clear();
        self.view_mode = ViewMode::Categories;
        self.refilter();
    }

    /// Shows the grid without changing filters.
    pub fn show_grid(&mut self) {
        self.view_mode = ViewMode::Grid;
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.items, &self.selection);
    }

    // -------------------------------------------------------------------------
    // Viewer
    // -------------------------------------------------------------------------

    /// Opens the viewer over the currently visible items at `index`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGallery`] if no item is visible.
    pub fn open_viewer(&self, index: usize) -> Result<ViewerController> {
        let items: Arc<[GalleryItem]> = if self.selection.is_active() {
            self.filtered_items().into_iter().cloned().collect()
        } else {
            Arc::clone(&self.items)
        };
        let mut viewer = ViewerController::new(
            self.store_id.clone(),
            items,
            self.collaborators.clone(),
            self.viewer_options,
        );
        viewer.open(index)?;
        Ok(viewer)
    }
}

impl std::fmt::Debug for GallerySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GallerySection")
            .field("store_id", &self.store_id)
            .field("load_state", &self.load_state)
            .field("items", &self.items.len())
            .field("categories", &self.categories.len())
            .field("selection", &self.selection)
            .field("view_mode", &self.view_mode)
            .field("filtered", &self.filtered.len())
            .finish_non_exhaustive()
    }
}
