// SPDX-License-Identifier: MPL-2.0
//! Core gallery types for the domain layer.
//!
//! These types represent fetched catalog data without any transport or
//! presentation dependencies. Items are immutable once fetched.

use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a gallery item as assigned by the gallery service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of the store whose gallery is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreId(String);

impl StoreId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the two kinds of gallery media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

/// Fields shared by every gallery item regardless of its media type.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub id: ItemId,
    /// Full-resolution media URL.
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: BTreeSet<String>,
    /// Single-select coarse grouping.
    pub category: String,
    /// Whether the item is the cover of its category.
    pub is_cover: bool,
    /// View count as last reported by the gallery service.
    pub views: u64,
    /// Curated display position.
    pub order: i64,
}

impl ItemDetails {
    /// Creates details with only the mandatory fields set.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            description: None,
            tags: BTreeSet::new(),
            category: category.into(),
            is_cover: false,
            views: 0,
            order: 0,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn as_cover(mut self) -> Self {
        self.is_cover = true;
        self
    }
}

/// A gallery entry: either a still image or a video.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryItem {
    Image {
        details: ItemDetails,
        /// Reduced-size rendition for grids, if the service provides one.
        thumbnail: Option<String>,
    },
    Video {
        details: ItemDetails,
        /// Poster frame; videos are never warmed by their stream URL.
        thumbnail: Option<String>,
    },
}

impl GalleryItem {
    #[must_use]
    pub fn image(details: ItemDetails) -> Self {
        GalleryItem::Image {
            details,
            thumbnail: None,
        }
    }

    #[must_use]
    pub fn video(details: ItemDetails, thumbnail: impl Into<String>) -> Self {
        GalleryItem::Video {
            details,
            thumbnail: Some(thumbnail.into()),
        }
    }

    #[must_use]
    pub fn details(&self) -> &ItemDetails {
        match self {
            GalleryItem::Image { details, .. } | GalleryItem::Video { details, .. } => details,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.details().id
    }

    #[must_use]
    pub fn media_type(&self) -> MediaType {
        match self {
            GalleryItem::Image { .. } => MediaType::Image,
            GalleryItem::Video { .. } => MediaType::Video,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.details().url
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        match self {
            GalleryItem::Image { thumbnail, .. } | GalleryItem::Video { thumbnail, .. } => {
                thumbnail.as_deref()
            }
        }
    }

    /// URL to warm in the image cache: the poster for videos, the full image otherwise.
    #[must_use]
    pub fn prefetch_url(&self) -> Option<&str> {
        match self {
            GalleryItem::Image { details, .. } => Some(details.url.as_str()),
            GalleryItem::Video { thumbnail, .. } => thumbnail.as_deref(),
        }
    }

    /// URL shown in grid and category cards.
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        match self {
            GalleryItem::Image { details, thumbnail } => {
                Some(thumbnail.as_deref().unwrap_or(details.url.as_str()))
            }
            GalleryItem::Video { thumbnail, .. } => thumbnail.as_deref(),
        }
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.details().tags
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.details().category
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.details().title.as_deref()
    }

    #[must_use]
    pub fn views(&self) -> u64 {
        self.details().views
    }

    #[must_use]
    pub fn is_cover(&self) -> bool {
        self.details().is_cover
    }
}

/// A coarse grouping of gallery items, as shown on the category cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCategory {
    pub name: String,
    pub cover_image: Option<String>,
    pub count: usize,
}

impl GalleryCategory {
    /// Derives categories from the items themselves.
    ///
    /// Used when the category service returns nothing. Categories keep the
    /// order in which they first appear; names compare case-insensitively and
    /// the first spelling wins. The cover is the first cover item's preview,
    /// falling back to the first item's preview.
    #[must_use]
    pub fn derive_from(items: &[GalleryItem]) -> Vec<GalleryCategory> {
        let mut categories: Vec<(String, GalleryCategory, bool)> = Vec::new();

        for item in items {
            let key = item.category().to_lowercase();
            let position = categories.iter().position(|(k, _, _)| *k == key);
            let (_, category, has_cover) = match position {
                Some(index) => &mut categories[index],
                None => {
                    categories.push((
                        key,
                        GalleryCategory {
                            name: item.category().to_string(),
                            cover_image: None,
                            count: 0,
                        },
                        false,
                    ));
                    let last = categories.len() - 1;
                    &mut categories[last]
                }
            };

            category.count += 1;
            if !*has_cover && item.is_cover() {
                category.cover_image = item.preview_url().map(str::to_string);
                *has_cover = true;
            } else if category.cover_image.is_none() {
                category.cover_image = item.preview_url().map(str::to_string);
            }
        }

        categories.into_iter().map(|(_, c, _)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: u64, category: &str) -> GalleryItem {
        GalleryItem::image(ItemDetails::new(id, format!("https://cdn/{id}.jpg"), category))
    }

    #[test]
    fn video_prefetches_its_thumbnail() {
        let video = GalleryItem::video(
            ItemDetails::new(7u64, "https://cdn/7.mp4", "tour"),
            "https://cdn/7.jpg",
        );
        assert_eq!(video.media_type(), MediaType::Video);
        assert_eq!(video.prefetch_url(), Some("https://cdn/7.jpg"));
        assert_eq!(video.url(), "https://cdn/7.mp4");
    }

    #[test]
    fn video_without_thumbnail_has_nothing_to_prefetch() {
        let video = GalleryItem::Video {
            details: ItemDetails::new(8u64, "https://cdn/8.mp4", "tour"),
            thumbnail: None,
        };
        assert!(video.prefetch_url().is_none());
        assert!(video.preview_url().is_none());
    }

    #[test]
    fn image_prefetches_full_url_and_previews_thumbnail() {
        let item = GalleryItem::Image {
            details: ItemDetails::new(1u64, "https://cdn/1.jpg", "food"),
            thumbnail: Some("https://cdn/1_small.jpg".into()),
        };
        assert_eq!(item.prefetch_url(), Some("https://cdn/1.jpg"));
        assert_eq!(item.preview_url(), Some("https://cdn/1_small.jpg"));
    }

    #[test]
    fn derive_categories_counts_and_picks_cover() {
        let items = vec![
            image(1, "Food"),
            GalleryItem::image(ItemDetails::new(2u64, "https://cdn/2.jpg", "food").as_cover()),
            image(3, "drinks"),
        ];

        let categories = GalleryCategory::derive_from(&items);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Food");
        assert_eq!(categories[0].count, 2);
        assert_eq!(categories[0].cover_image.as_deref(), Some("https://cdn/2.jpg"));
        assert_eq!(categories[1].name, "drinks");
        assert_eq!(categories[1].cover_image.as_deref(), Some("https://cdn/3.jpg"));
    }

    #[test]
    fn item_id_from_number_and_str_agree() {
        assert_eq!(ItemId::from(42u64), ItemId::from("42"));
    }
}
