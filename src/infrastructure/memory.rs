// SPDX-License-Identifier: MPL-2.0
//! In-memory gallery service backed by a TOML fixture.
//!
//! Used by the demo binary and the integration tests. Besides serving items it
//! records every call and can be scripted to fail or to delay view tracking.
//!
//! # Fixture format
//!
//! ```toml
//! [[items]]
//! id = "1"
//! type = "image"          # or "video"
//! url = "https://cdn.example.com/1.jpg"
//! thumbnail = "https://cdn.example.com/1-thumb.jpg"
//! title = "Margherita"
//! category = "food"
//! tags = ["veg"]
//! views = 12
//! order = 1
//! is_cover = true
//!
//! [[categories]]          # optional; derived from items when absent
//! name = "food"
//! count = 1
//! ```

use crate::application::port::{GalleryQuery, GalleryService, ServiceError};
use crate::config::{SortBy, SortOrder};
use crate::domain::gallery::{GalleryCategory, GalleryItem, ItemDetails, ItemId, StoreId};
use crate::error::{Error, Result};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

// =============================================================================
// Fixture records
// =============================================================================

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RecordKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Deserialize)]
struct ItemRecord {
    id: String,
    #[serde(rename = "type", default)]
    kind: RecordKind,
    url: String,
    thumbnail: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    category: String,
    #[serde(default)]
    is_cover: bool,
    #[serde(default)]
    views: u64,
    #[serde(default)]
    order: i64,
}

impl From<ItemRecord> for GalleryItem {
    fn from(record: ItemRecord) -> Self {
        let mut details = ItemDetails::new(record.id.as_str(), record.url, record.category)
            .with_tags(record.tags)
            .with_views(record.views)
            .with_order(record.order);
        details.title = record.title;
        details.description = record.description;
        details.is_cover = record.is_cover;

        match record.kind {
            RecordKind::Image => GalleryItem::Image {
                details,
                thumbnail: record.thumbnail,
            },
            RecordKind::Video => GalleryItem::Video {
                details,
                thumbnail: record.thumbnail,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    name: String,
    cover_image: Option<String>,
    #[serde(default)]
    count: usize,
}

impl From<CategoryRecord> for GalleryCategory {
    fn from(record: CategoryRecord) -> Self {
        GalleryCategory {
            name: record.name,
            cover_image: record.cover_image,
            count: record.count,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FixtureFile {
    items: Vec<ItemRecord>,
    categories: Vec<CategoryRecord>,
}

// =============================================================================
// Service
// =============================================================================

/// Calls received by an [`InMemoryGalleryService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub gallery: usize,
    pub categories: usize,
    pub track_view: usize,
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<GalleryItem>,
    categories: Vec<GalleryCategory>,
    views: HashMap<ItemId, u64>,
    tracked: Vec<ItemId>,
    calls: CallCounts,
    gallery_failures: VecDeque<ServiceError>,
    category_failures: VecDeque<ServiceError>,
    track_failures: VecDeque<ServiceError>,
    track_delay: Option<Duration>,
}

/// Gallery service serving a fixed collection.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGalleryService {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryGalleryService {
    #[must_use]
    pub fn new(items: Vec<GalleryItem>, categories: Vec<GalleryCategory>) -> Self {
        let views = items
            .iter()
            .map(|item| (item.id().clone(), item.views()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                items,
                categories,
                views,
                ..Inner::default()
            })),
        }
    }

    /// Parses a TOML fixture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fixture`] if the document is not a valid fixture.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let fixture: FixtureFile =
            toml::from_str(source).map_err(|e| Error::Fixture(e.to_string()))?;
        let items = fixture.items.into_iter().map(GalleryItem::from).collect();
        let categories = fixture
            .categories
            .into_iter()
            .map(GalleryCategory::from)
            .collect();
        Ok(Self::new(items, categories))
    }

    /// Reads and parses a TOML fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Fixture`]
    /// if it is not a valid fixture.
    pub fn from_fixture_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Makes the next `times` gallery fetches fail with `error`.
    pub fn fail_gallery(&self, times: usize, error: ServiceError) {
        self.lock().gallery_failures.extend(std::iter::repeat_n(error, times));
    }

    /// Makes the next `times` category fetches fail with `error`.
    pub fn fail_categories(&self, times: usize, error: ServiceError) {
        self.lock().category_failures.extend(std::iter::repeat_n(error, times));
    }

    /// Makes the next `times` view-tracking calls fail with `error`.
    pub fn fail_track_view(&self, times: usize, error: ServiceError) {
        self.lock().track_failures.extend(std::iter::repeat_n(error, times));
    }

    /// Delays every view-tracking response.
    pub fn set_track_delay(&self, delay: Option<Duration>) {
        self.lock().track_delay = delay;
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Item ids passed to `track_view`, in call order.
    #[must_use]
    pub fn tracked(&self) -> Vec<ItemId> {
        self.lock().tracked.clone()
    }

    /// Current server-side view count of an item.
    #[must_use]
    pub fn view_count(&self, id: &ItemId) -> Option<u64> {
        self.lock().views.get(id).copied()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sort_items(items: &mut [GalleryItem], query: GalleryQuery) {
    match query.sort_by {
        SortBy::Order => items.sort_by_key(|item| item.details().order),
        SortBy::Views => items.sort_by_key(GalleryItem::views),
        // Fixture position stands in for creation time: the fixture is
        // already oldest first.
        SortBy::Recent => {}
    }
    if query.sort_order == SortOrder::Descending {
        items.reverse();
    }
}

impl GalleryService for InMemoryGalleryService {
    fn get_gallery(
        &self,
        store: &StoreId,
        query: GalleryQuery,
    ) -> BoxFuture<'static, std::result::Result<Vec<GalleryItem>, ServiceError>> {
        let mut inner = self.lock();
        inner.calls.gallery += 1;
        let result = match inner.gallery_failures.pop_front() {
            Some(error) => Err(error),
            None => {
                let mut items = inner.items.clone();
                sort_items(&mut items, query);
                items.truncate(query.limit as usize);
                Ok(items)
            }
        };
        tracing::trace!(%store, ok = result.is_ok(), "in-memory gallery fetch");
        futures_util::future::ready(result).boxed()
    }

    fn get_categories(
        &self,
        store: &StoreId,
    ) -> BoxFuture<'static, std::result::Result<Vec<GalleryCategory>, ServiceError>> {
        let mut inner = self.lock();
        inner.calls.categories += 1;
        let result = match inner.category_failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(inner.categories.clone()),
        };
        tracing::trace!(%store, ok = result.is_ok(), "in-memory category fetch");
        futures_util::future::ready(result).boxed()
    }

    fn track_view(
        &self,
        _store: &StoreId,
        item: &ItemId,
    ) -> BoxFuture<'static, std::result::Result<Option<u64>, ServiceError>> {
        let mut inner = self.lock();
        inner.calls.track_view += 1;
        inner.tracked.push(item.clone());
        let result = match inner.track_failures.pop_front() {
            Some(error) => Err(error),
            None => match inner.views.get_mut(item) {
                Some(count) => {
                    *count += 1;
                    Ok(Some(*count))
                }
                None => Err(ServiceError::NotFound),
            },
        };
        let delay = inner.track_delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        [[items]]
        id = "1"
        url = "https://cdn/1.jpg"
        category = "food"
        tags = ["spicy", "veg"]
        views = 3
        order = 2

        [[items]]
        id = "2"
        type = "video"
        url = "https://cdn/2.mp4"
        thumbnail = "https://cdn/2.jpg"
        category = "tour"
        views = 9
        order = 1
    "#;

    #[test]
    fn fixture_parses_items_and_media_types() {
        let service = InMemoryGalleryService::from_toml_str(FIXTURE).unwrap();
        let items = service.lock().items.clone();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], GalleryItem::Image { .. }));
        assert_eq!(items[1].prefetch_url(), Some("https://cdn/2.jpg"));
        assert_eq!(items[0].tags().len(), 2);
    }

    #[test]
    fn invalid_fixture_is_a_fixture_error() {
        let result = InMemoryGalleryService::from_toml_str("[[items]]\nid = 1");
        assert!(matches!(result, Err(Error::Fixture(_))));
    }

    #[tokio::test]
    async fn gallery_respects_sorting_and_limit() {
        let service = InMemoryGalleryService::from_toml_str(FIXTURE).unwrap();
        let store = StoreId::new("s");

        let by_order = service
            .get_gallery(&store, GalleryQuery::default())
            .await
            .unwrap();
        assert_eq!(by_order[0].id(), &ItemId::from("2"));

        let query = GalleryQuery::new(1, SortBy::Views, SortOrder::Descending);
        let top = service.get_gallery(&store, query).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id(), &ItemId::from("2"));
    }

    #[tokio::test]
    async fn recent_sorting_follows_creation_order() {
        let service = InMemoryGalleryService::from_toml_str(FIXTURE).unwrap();
        let store = StoreId::new("s");

        let oldest_first = GalleryQuery::new(10, SortBy::Recent, SortOrder::Ascending);
        let items = service.get_gallery(&store, oldest_first).await.unwrap();
        assert_eq!(items[0].id(), &ItemId::from("1"));

        let newest_first = GalleryQuery::new(1, SortBy::Recent, SortOrder::Descending);
        let items = service.get_gallery(&store, newest_first).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), &ItemId::from("2"));
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let service = InMemoryGalleryService::from_toml_str(FIXTURE).unwrap();
        let store = StoreId::new("s");
        service.fail_gallery(1, ServiceError::Status { status: 500 });

        assert!(service
            .get_gallery(&store, GalleryQuery::default())
            .await
            .is_err());
        assert!(service
            .get_gallery(&store, GalleryQuery::default())
            .await
            .is_ok());
        assert_eq!(service.calls().gallery, 2);
    }

    #[tokio::test]
    async fn track_view_increments_server_count() {
        let service = InMemoryGalleryService::from_toml_str(FIXTURE).unwrap();
        let store = StoreId::new("s");
        let id = ItemId::from("1");

        assert_eq!(service.track_view(&store, &id).await, Ok(Some(4)));
        assert_eq!(service.view_count(&id), Some(4));
        assert_eq!(
            service.track_view(&store, &ItemId::from("404")).await,
            Err(ServiceError::NotFound)
        );
        assert_eq!(service.tracked().len(), 2);
    }
}
