// SPDX-License-Identifier: MPL-2.0
//! Gallery data service port definition.
//!
//! This module defines the [`GalleryService`] trait through which the section
//! fetches items and categories, and through which the viewer reports views.
//! The REST layer behind it is supplied by the host application.

use crate::config::{GallerySettings, SortBy, SortOrder, MAX_GALLERY_LIMIT};
use crate::domain::gallery::{GalleryCategory, GalleryItem, ItemId, StoreId};
use futures_util::future::BoxFuture;

// =============================================================================
// ServiceError
// =============================================================================

/// Errors reported by the gallery data service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request could not reach the service.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a failure status.
    #[error("Service returned status {status}")]
    Status {
        /// HTTP-like status code.
        status: u16,
    },

    /// The response could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The store or item does not exist.
    #[error("Not found")]
    NotFound,
}

// =============================================================================
// GalleryQuery
// =============================================================================

/// Paging and ordering options for a gallery fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryQuery {
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl GalleryQuery {
    /// Creates a query, clamping the limit to `1..=MAX_GALLERY_LIMIT`.
    #[must_use]
    pub fn new(limit: u32, sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            limit: limit.clamp(1, MAX_GALLERY_LIMIT),
            sort_by,
            sort_order,
        }
    }
}

impl Default for GalleryQuery {
    fn default() -> Self {
        Self::from(&GallerySettings::default())
    }
}

impl From<&GallerySettings> for GalleryQuery {
    fn from(settings: &GallerySettings) -> Self {
        Self::new(settings.limit, settings.sort_by, settings.sort_order)
    }
}

// =============================================================================
// GalleryService Trait
// =============================================================================

/// Port for the remote gallery API.
///
/// Futures are `'static` so callers can spawn them; implementations clone
/// whatever they need from the arguments.
///
/// # Example
///
/// ```ignore
/// use gallery_lens::application::port::GalleryService;
///
/// async fn count(service: &dyn GalleryService, store: &StoreId) -> usize {
///     service
///         .get_gallery(store, GalleryQuery::default())
///         .await
///         .map(|items| items.len())
///         .unwrap_or(0)
/// }
/// ```
pub trait GalleryService: Send + Sync {
    /// Fetches the ordered gallery of a store.
    fn get_gallery(
        &self,
        store: &StoreId,
        query: GalleryQuery,
    ) -> BoxFuture<'static, Result<Vec<GalleryItem>, ServiceError>>;

    /// Fetches the categories of a store.
    fn get_categories(
        &self,
        store: &StoreId,
    ) -> BoxFuture<'static, Result<Vec<GalleryCategory>, ServiceError>>;

    /// Increments the view count of an item.
    ///
    /// Returns the updated count. `None` or `Some(0)` means the service has
    /// no update to report.
    fn track_view(
        &self,
        store: &StoreId,
        item: &ItemId,
    ) -> BoxFuture<'static, Result<Option<u64>, ServiceError>>;
}
