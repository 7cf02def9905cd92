// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! This module contains the catalog items, their categories and the
//! filtering rules, independent of any transport or presentation concerns.

pub mod filter;
pub mod types;

// Re-export commonly used types
pub use filter::{filter_indices, filter_items, tag_universe, CategorySelection, FilterSelection};
pub use types::{GalleryCategory, GalleryItem, ItemDetails, ItemId, MediaType, StoreId};
