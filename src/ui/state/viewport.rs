// SPDX-License-Identifier: MPL-2.0
//! Viewport and display area sizing
//!
//! The display area is the rectangle an image occupies at rest. It is the
//! natural image size fitted into the viewport, or the whole viewport while
//! the natural size is unknown (load pending or failed).

/// A width/height pair in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Rest-position rectangle of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayArea {
    pub width: f32,
    pub height: f32,
    /// Whether the size came from the image itself rather than the viewport fallback.
    pub from_natural_size: bool,
}

impl DisplayArea {
    /// Viewport-sized area used while natural dimensions are unknown.
    ///
    /// Non-finite or negative dimensions count as zero.
    #[must_use]
    pub fn fallback(viewport: Size) -> Self {
        Self {
            width: finite_extent(viewport.width),
            height: finite_extent(viewport.height),
            from_natural_size: false,
        }
    }

    /// Fits `natural` into `viewport` preserving its aspect ratio.
    ///
    /// Falls back to the viewport size when `natural` is absent or degenerate.
    #[must_use]
    pub fn resolve(viewport: Size, natural: Option<Size>) -> Self {
        let Some(natural) = natural.filter(|n| n.is_valid()) else {
            return Self::fallback(viewport);
        };
        if !viewport.is_valid() {
            return Self::fallback(viewport);
        }

        let ratio = (viewport.width / natural.width).min(viewport.height / natural.height);
        Self {
            width: natural.width * ratio,
            height: natural.height * ratio,
            from_natural_size: true,
        }
    }

    /// Returns whether the area has a usable size on both axes.
    ///
    /// An empty area means the viewport was never measured.
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Largest translation magnitude per axis that keeps a zoomed image
    /// covering its rest position.
    #[must_use]
    pub fn max_translation(&self, scale: f32) -> (f32, f32) {
        let excess = (scale - 1.0).max(0.0) / 2.0;
        (self.width * excess, self.height * excess)
    }
}

fn finite_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn unknown_natural_size_falls_back_to_viewport() {
        let area = DisplayArea::resolve(Size::new(400.0, 800.0), None);
        assert_eq!(area.width, 400.0);
        assert_eq!(area.height, 800.0);
        assert!(!area.from_natural_size);
    }

    #[test]
    fn degenerate_natural_size_falls_back_to_viewport() {
        let area = DisplayArea::resolve(Size::new(400.0, 800.0), Some(Size::new(0.0, 300.0)));
        assert!(!area.from_natural_size);
        assert_eq!(area.width, 400.0);
    }

    #[test]
    fn landscape_image_fits_viewport_width() {
        let area = DisplayArea::resolve(Size::new(400.0, 800.0), Some(Size::new(2000.0, 1000.0)));
        assert!(area.from_natural_size);
        assert_abs_diff_eq!(area.width, 400.0, epsilon = 1e-3);
        assert_abs_diff_eq!(area.height, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn non_finite_viewport_falls_back_to_empty_area() {
        let area = DisplayArea::fallback(Size::new(f32::INFINITY, f32::NAN));
        assert_eq!((area.width, area.height), (0.0, 0.0));
        assert!(!area.has_extent());
        assert_eq!(area.max_translation(1.0), (0.0, 0.0));

        let area = DisplayArea::resolve(Size::new(f32::INFINITY, 800.0), None);
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 800.0);
    }

    #[test]
    fn max_translation_grows_with_scale() {
        let area = DisplayArea::fallback(Size::new(400.0, 200.0));
        assert_eq!(area.max_translation(1.0), (0.0, 0.0));
        assert_eq!(area.max_translation(2.0), (200.0, 100.0));
    }
}
