// SPDX-License-Identifier: MPL-2.0
//! Image prefetch for faster carousel navigation.
//!
//! This module warms the host's image cache for the neighbors of the current
//! carousel position, reducing perceived latency when paging.
//!
//! # Design
//!
//! - **Windowed**: the desired set is `{index-W, …, index+W} ∩ [0, len)`
//! - **Deduplicated**: URLs already requested in this session are remembered
//!   in a bounded LRU and not requested again
//! - **Best effort**: warm requests run as background tasks and every failure
//!   is swallowed
//! - **Abortable**: outstanding tasks are aborted when the viewer closes
//!
//! # Usage
//!
//! ```ignore
//! let mut prefetch = PrefetchController::new(config, cache);
//!
//! // On every index change
//! let window = prefetch.recompute(index, &items);
//!
//! // When the viewer closes
//! prefetch.cancel_all();
//! ```

use crate::application::port::ImageCache;
use crate::config::{
    PrefetchSettings, DEFAULT_PREFETCH_MEMORY, MAX_PREFETCH_MEMORY, MIN_PREFETCH_MEMORY,
};
use crate::domain::gallery::GalleryItem;
use crate::domain::ui::PrefetchRadius;
use lru::LruCache;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Configuration for the prefetch controller.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchConfig {
    /// Number of items warmed in each direction (next/previous).
    pub radius: PrefetchRadius,

    /// Number of requested URLs remembered for deduplication.
    pub memory: usize,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            radius: PrefetchRadius::default(),
            memory: DEFAULT_PREFETCH_MEMORY,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new prefetch configuration with specified limits.
    ///
    /// The memory always holds at least one full window, so recomputing the
    /// same neighborhood never evicts URLs it is about to check.
    #[must_use]
    pub fn new(radius: usize, memory: usize) -> Self {
        let radius = PrefetchRadius::new(radius);
        let window = 2 * radius.value() + 1;
        Self {
            radius,
            memory: memory.clamp(MIN_PREFETCH_MEMORY, MAX_PREFETCH_MEMORY).max(window),
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Whether any warm request can ever be issued.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.radius.is_disabled()
    }
}

impl From<&PrefetchSettings> for PrefetchConfig {
    fn from(settings: &PrefetchSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ..Self::new(settings.radius, settings.memory)
        }
    }
}

/// Statistics about prefetch activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Warm requests spawned.
    pub requested: u64,

    /// Window entries skipped because the URL was already requested.
    pub deduplicated: u64,

    /// Window entries skipped because the item has nothing to prefetch.
    pub skipped: u64,

    /// Tasks aborted by `cancel_all`.
    pub cancelled: u64,
}

/// Computes the prefetch window around `index`.
///
/// Returns `{index-radius, …, index+radius} ∩ [0, len)`, including `index`.
#[must_use]
pub fn prefetch_window(index: usize, radius: usize, len: usize) -> BTreeSet<usize> {
    if len == 0 || index >= len {
        return BTreeSet::new();
    }
    let start = index.saturating_sub(radius);
    let end = index.saturating_add(radius).min(len - 1);
    (start..=end).collect()
}

/// Issues cache-warm requests for the neighborhood of the current item.
pub struct PrefetchController {
    config: PrefetchConfig,

    cache: Arc<dyn ImageCache>,

    /// URLs already requested this session.
    requested: LruCache<String, ()>,

    /// Outstanding warm requests.
    tasks: JoinSet<()>,

    stats: PrefetchStats,
}

impl PrefetchController {
    /// Creates a controller warming `cache`.
    #[must_use]
    pub fn new(config: PrefetchConfig, cache: Arc<dyn ImageCache>) -> Self {
        let capacity = NonZeroUsize::new(config.memory).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            cache,
            requested: LruCache::new(capacity),
            tasks: JoinSet::new(),
            stats: PrefetchStats::default(),
        }
    }

    /// Returns whether prefetching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_active()
    }

    #[must_use]
    pub fn radius(&self) -> usize {
        self.config.radius.value()
    }

    /// Recomputes the desired set for `index` and warms every URL not yet requested.
    ///
    /// Must be called from within a tokio runtime. Returns the computed window,
    /// which is empty when prefetching is disabled.
    pub fn recompute(&mut self, index: usize, items: &[GalleryItem]) -> BTreeSet<usize> {
        self.reap_finished();

        if !self.config.is_active() {
            return BTreeSet::new();
        }

        let window = prefetch_window(index, self.config.radius.value(), items.len());
        for &position in &window {
            let Some(url) = items[position].prefetch_url() else {
                self.stats.skipped += 1;
                continue;
            };
            // `get` refreshes recency for URLs still in the neighborhood.
            if self.requested.get(url).is_some() {
                self.stats.deduplicated += 1;
                continue;
            }
            self.requested.put(url.to_string(), ());
            self.spawn_warm(url.to_string());
        }

        tracing::trace!(index, window = ?window, "prefetch window recomputed");
        window
    }

    /// Aborts every outstanding warm request.
    pub fn cancel_all(&mut self) {
        let outstanding = self.tasks.len() as u64;
        self.tasks.abort_all();
        self.stats.cancelled += outstanding;
        if outstanding > 0 {
            tracing::debug!(outstanding, "prefetch requests cancelled");
        }
    }

    /// Forgets every requested URL so the next window is warmed again.
    pub fn clear(&mut self) {
        self.requested.clear();
    }

    /// Returns whether `url` has been requested this session, without updating LRU order.
    #[must_use]
    pub fn was_requested(&self, url: &str) -> bool {
        self.requested.contains(url)
    }

    /// Number of warm requests still tracked.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    fn spawn_warm(&mut self, url: String) {
        let warm = self.cache.warm(url.clone());
        self.stats.requested += 1;
        self.tasks.spawn(async move {
            if let Err(error) = warm.await {
                tracing::trace!(%url, %error, "prefetch failed, ignoring");
            }
        });
    }

    fn reap_finished(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }
}

impl std::fmt::Debug for PrefetchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchController")
            .field("enabled", &self.config.enabled)
            .field("radius", &self.config.radius.value())
            .field("requested", &self.requested.len())
            .field("outstanding", &self.tasks.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Drop for PrefetchController {
    fn drop(&mut self) {
        self.tasks.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::CacheError;
    use crate::domain::gallery::ItemDetails;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCache {
        urls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingCache {
        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    impl ImageCache for RecordingCache {
        fn warm(&self, url: String) -> BoxFuture<'static, Result<(), CacheError>> {
            self.urls.lock().unwrap().push(url.clone());
            let fail = self.fail;
            async move {
                if fail {
                    Err(CacheError::Download(url))
                } else {
                    Ok(())
                }
            }
            .boxed()
        }
    }

    fn items(count: u64) -> Vec<GalleryItem> {
        (0..count)
            .map(|id| {
                let details = ItemDetails::new(id, format!("https://cdn/{id}.jpg"), "food");
                if id % 2 == 1 {
                    GalleryItem::video(details, format!("https://cdn/{id}-thumb.jpg"))
                } else {
                    GalleryItem::image(details)
                }
            })
            .collect()
    }

    #[test]
    fn window_is_clipped_to_bounds() {
        assert_eq!(prefetch_window(0, 2, 5), BTreeSet::from([0, 1, 2]));
        assert_eq!(prefetch_window(4, 2, 5), BTreeSet::from([2, 3, 4]));
        assert_eq!(prefetch_window(2, 2, 5), BTreeSet::from([0, 1, 2, 3, 4]));
        assert_eq!(prefetch_window(2, 10, 3), BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn window_handles_degenerate_inputs() {
        assert!(prefetch_window(0, 2, 0).is_empty());
        assert!(prefetch_window(7, 2, 5).is_empty());
        assert_eq!(prefetch_window(3, 0, 5), BTreeSet::from([3]));
        assert_eq!(prefetch_window(usize::MAX - 1, 5, usize::MAX).len(), 6);
    }

    #[test]
    fn config_clamps_values() {
        let config = PrefetchConfig::new(1, 1);
        assert_eq!(config.radius.value(), 1);
        assert_eq!(config.memory, MIN_PREFETCH_MEMORY);

        let config = PrefetchConfig::new(50, 10_000);
        assert_eq!(config.radius.value(), 10);
        assert_eq!(config.memory, MAX_PREFETCH_MEMORY);
        assert!(!PrefetchConfig::disabled().is_active());
        assert!(!PrefetchConfig::new(0, 64).is_active());
    }

    #[tokio::test]
    async fn recompute_warms_thumbnails_for_videos() {
        let cache = Arc::new(RecordingCache::default());
        let mut prefetch = PrefetchController::new(PrefetchConfig::new(1, 64), cache.clone());

        let window = prefetch.recompute(0, &items(5));
        assert_eq!(window, BTreeSet::from([0, 1]));
        assert_eq!(
            cache.urls(),
            vec![
                "https://cdn/0.jpg".to_string(),
                "https://cdn/1-thumb.jpg".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn revisiting_a_neighborhood_does_not_rerequest() {
        let cache = Arc::new(RecordingCache::default());
        let mut prefetch = PrefetchController::new(PrefetchConfig::new(1, 64), cache.clone());
        let items = items(5);

        prefetch.recompute(2, &items);
        prefetch.recompute(3, &items);
        prefetch.recompute(2, &items);

        // 1, 2, 3 then 4
        assert_eq!(cache.urls().len(), 4);
        assert_eq!(prefetch.stats().requested, 4);
        assert!(prefetch.stats().deduplicated >= 5);
    }

    #[test]
    fn memory_holds_at_least_one_window() {
        let config = PrefetchConfig::new(10, 8);
        assert_eq!(config.memory, 21);
    }

    #[tokio::test]
    async fn widest_window_is_not_rerequested_with_small_memory() {
        let cache = Arc::new(RecordingCache::default());
        let mut prefetch = PrefetchController::new(PrefetchConfig::new(10, 8), cache.clone());
        let items = items(40);

        prefetch.recompute(20, &items);
        assert_eq!(cache.urls().len(), 21);

        prefetch.recompute(20, &items);
        assert_eq!(cache.urls().len(), 21);
        assert_eq!(prefetch.stats().deduplicated, 21);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let cache = Arc::new(RecordingCache {
            fail: true,
            ..Default::default()
        });
        let mut prefetch = PrefetchController::new(PrefetchConfig::default(), cache);
        let window = prefetch.recompute(0, &items(3));
        assert_eq!(window.len(), 3);
        tokio::task::yield_now().await;
        prefetch.recompute(1, &items(3));
    }

    #[tokio::test]
    async fn disabled_controller_requests_nothing() {
        let cache = Arc::new(RecordingCache::default());
        let mut prefetch = PrefetchController::new(PrefetchConfig::disabled(), cache.clone());
        assert!(prefetch.recompute(1, &items(3)).is_empty());
        assert!(cache.urls().is_empty());
        assert!(!prefetch.is_enabled());
    }

    #[tokio::test]
    async fn cancel_all_aborts_outstanding_requests() {
        struct PendingCache;
        impl ImageCache for PendingCache {
            fn warm(&self, _url: String) -> BoxFuture<'static, Result<(), CacheError>> {
                futures_util::future::pending().boxed()
            }
        }

        let mut prefetch =
            PrefetchController::new(PrefetchConfig::default(), Arc::new(PendingCache));
        prefetch.recompute(0, &items(3));
        assert_eq!(prefetch.outstanding(), 3);

        prefetch.cancel_all();
        assert_eq!(prefetch.stats().cancelled, 3);
    }
}
