// SPDX-License-Identifier: MPL-2.0
//! Adapters for hosts without a share surface or image cache.

use crate::application::port::{
    CacheError, ImageCache, ShareError, ShareOutcome, ShareRequest, ShareSheet,
};
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;

/// Share sheet that logs the request and reports it as dismissed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopShareSheet;

impl ShareSheet for NoopShareSheet {
    fn share(&self, request: ShareRequest) -> BoxFuture<'static, Result<ShareOutcome, ShareError>> {
        tracing::debug!(url = %request.media_url, "no share surface, request dismissed");
        future::ready(Ok(ShareOutcome::Dismissed)).boxed()
    }
}

/// Image cache that accepts every warm request without storing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageCache;

impl ImageCache for NoopImageCache {
    fn warm(&self, url: String) -> BoxFuture<'static, Result<(), CacheError>> {
        tracing::trace!(%url, "cache warm skipped");
        future::ready(Ok(())).boxed()
    }
}
