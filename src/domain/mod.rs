// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`gallery`]: Catalog types ([`GalleryItem`](gallery::GalleryItem),
//!   [`GalleryCategory`](gallery::GalleryCategory)) and filtering
//!   ([`FilterSelection`](gallery::FilterSelection))
//! - [`ui`]: UI value objects ([`ZoomScale`](ui::ZoomScale),
//!   [`PrefetchRadius`](ui::PrefetchRadius), [`ViewMode`](ui::ViewMode))

pub mod gallery;
pub mod ui;
