// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that the host application
//! implements. These traits use only domain types, ensuring the application
//! layer remains independent of concrete transports and platform surfaces.
//!
//! # Available Ports
//!
//! - [`gallery`]: Gallery data service (items, categories, view tracking)
//! - [`analytics`]: Fire-and-forget analytics events
//! - [`share`]: Platform share surface
//! - [`image_cache`]: Image cache warmed by prefetching
//!
//! # Design Notes
//!
//! - All traits are `Send + Sync` so they can be shared as `Arc<dyn _>`
//! - Asynchronous operations return `'static` boxed futures that callers spawn
//! - Only the gallery fetches produce errors that reach the user

pub mod analytics;
pub mod gallery;
pub mod image_cache;
pub mod share;

// Re-export main types for convenience
pub use analytics::{AnalyticsEvent, AnalyticsEventKind, AnalyticsSink, NoopAnalytics};
pub use gallery::{GalleryQuery, GalleryService, ServiceError};
pub use image_cache::{CacheError, ImageCache};
pub use share::{ShareError, ShareOutcome, ShareRequest, ShareSheet};
