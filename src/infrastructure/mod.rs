// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. Production hosts supply their own REST client, share
//! surface and image cache; these adapters cover the demo binary and tests.
//!
//! # Available Adapters
//!
//! - [`memory`]: Fixture-backed gallery service (implements [`GalleryService`])
//! - [`analytics`]: Channel and tracing analytics sinks (implement [`AnalyticsSink`])
//! - [`noop`]: Share sheet and image cache that do nothing
//!
//! [`GalleryService`]: crate::application::port::GalleryService
//! [`AnalyticsSink`]: crate::application::port::AnalyticsSink

pub mod analytics;
pub mod memory;
pub mod noop;

// Re-export main types for convenience
pub use analytics::{ChannelAnalytics, TracingAnalytics};
pub use memory::{CallCounts, InMemoryGalleryService};
pub use noop::{NoopImageCache, NoopShareSheet};
