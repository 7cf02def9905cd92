// SPDX-License-Identifier: MPL-2.0
//! The set of host-provided ports a gallery section works with.

use crate::application::port::{
    AnalyticsEvent, AnalyticsSink, GalleryService, ImageCache, NoopAnalytics, ShareSheet,
};
use std::sync::Arc;

/// Host collaborators, cheap to clone and shared between section and viewer.
#[derive(Clone)]
pub struct Collaborators {
    pub gallery: Arc<dyn GalleryService>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub share: Arc<dyn ShareSheet>,
    pub image_cache: Arc<dyn ImageCache>,
}

impl Collaborators {
    #[must_use]
    pub fn new(
        gallery: Arc<dyn GalleryService>,
        share: Arc<dyn ShareSheet>,
        image_cache: Arc<dyn ImageCache>,
    ) -> Self {
        Self {
            gallery,
            analytics: Arc::new(NoopAnalytics),
            share,
            image_cache,
        }
    }

    #[must_use]
    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Fire-and-forget analytics.
    pub(crate) fn emit(&self, event: AnalyticsEvent) {
        tracing::trace!(event = event.kind.name(), "analytics event");
        self.analytics.track(event);
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
