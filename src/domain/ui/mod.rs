// SPDX-License-Identifier: MPL-2.0
//! UI domain types.
//!
//! This module contains UI-related value objects that are independent
//! of any presentation framework.

pub mod newtypes;

// Re-export commonly used types
pub use newtypes::{MaxFetchAttempts, PrefetchRadius, ZoomScale};

/// Presentation mode of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Category cards.
    #[default]
    Categories,
    /// Multi-column thumbnail overview.
    Grid,
    /// One item at a time, paged horizontally.
    Carousel,
}

impl ViewMode {
    /// Name used in analytics payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Categories => "categories",
            ViewMode::Grid => "grid",
            ViewMode::Carousel => "carousel",
        }
    }
}
