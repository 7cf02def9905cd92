// SPDX-License-Identifier: MPL-2.0
//! Image cache port definition.
//!
//! The cache itself (memory or disk, decoding, eviction) belongs to the host.
//! The prefetch controller only asks it to warm URLs.

use futures_util::future::BoxFuture;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Cache full")]
    Full,
}

/// Port for the image cache that prefetching warms.
pub trait ImageCache: Send + Sync {
    /// Downloads `url` into the cache ahead of display.
    fn warm(&self, url: String) -> BoxFuture<'static, Result<(), CacheError>>;
}
