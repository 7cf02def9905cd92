// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom scale bounds (1× to 4×).
pub mod zoom_bounds {
    /// Scale at rest.
    pub const MIN: f32 = 1.0;
    /// Maximum pinch zoom.
    pub const MAX: f32 = 4.0;
}

// =============================================================================
// ZoomScale
// =============================================================================

/// Image zoom factor, guaranteed to be within valid range (1×–4×).
///
/// This type ensures that displayed scale values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Scale at rest.
    pub const REST: Self = Self(zoom_bounds::MIN);

    /// Creates a new scale, clamping the value to the valid range.
    ///
    /// NaN is treated as rest.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        if scale.is_nan() {
            return Self::REST;
        }
        Self(scale.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the scale is at rest.
    #[must_use]
    pub fn is_rest(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self::REST
    }
}

// =============================================================================
// Prefetch Radius
// =============================================================================

/// Prefetch radius bounds (0 to 10 items per side).
pub mod prefetch_bounds {
    /// Minimum radius (prefetching disabled).
    pub const MIN: usize = 0;
    /// Maximum radius.
    pub const MAX: usize = 10;
    /// Default radius.
    pub const DEFAULT: usize = 2;
}

/// Number of neighbors warmed on each side of the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchRadius(usize);

impl PrefetchRadius {
    /// Creates a new radius, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(prefetch_bounds::MIN, prefetch_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if no neighbor is warmed.
    #[must_use]
    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl Default for PrefetchRadius {
    fn default() -> Self {
        Self(prefetch_bounds::DEFAULT)
    }
}

// =============================================================================
// Max Fetch Attempts
// =============================================================================

/// Fetch attempt bounds (1 to 10).
pub mod attempt_bounds {
    /// Minimum number of attempts.
    pub const MIN: u32 = 1;
    /// Maximum number of attempts.
    pub const MAX: u32 = 10;
    /// Default number of attempts.
    pub const DEFAULT: u32 = 3;
}

/// Maximum number of automatic attempts for a critical load.
///
/// # Example
///
/// ```
/// use gallery_lens::domain::ui::MaxFetchAttempts;
///
/// let attempts = MaxFetchAttempts::new(5);
/// assert_eq!(attempts.value(), 5);
///
/// // Values outside range are clamped
/// let too_low = MaxFetchAttempts::new(0);
/// assert_eq!(too_low.value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxFetchAttempts(u32);

impl MaxFetchAttempts {
    /// Creates a new attempt count, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(attempt_bounds::MIN, attempt_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for MaxFetchAttempts {
    fn default() -> Self {
        Self(attempt_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DEFAULT_MAX_FETCH_ATTEMPTS, DEFAULT_PREFETCH_RADIUS, MAX_MAX_FETCH_ATTEMPTS,
        MAX_PREFETCH_RADIUS, MAX_ZOOM_SCALE, MIN_MAX_FETCH_ATTEMPTS, MIN_PREFETCH_RADIUS,
        MIN_ZOOM_SCALE,
    };

    // Verify domain bounds match config constants
    #[test]
    fn domain_bounds_match_config() {
        assert_eq!(zoom_bounds::MIN, MIN_ZOOM_SCALE);
        assert_eq!(zoom_bounds::MAX, MAX_ZOOM_SCALE);
        assert_eq!(prefetch_bounds::MIN, MIN_PREFETCH_RADIUS);
        assert_eq!(prefetch_bounds::MAX, MAX_PREFETCH_RADIUS);
        assert_eq!(prefetch_bounds::DEFAULT, DEFAULT_PREFETCH_RADIUS);
        assert_eq!(attempt_bounds::MIN, MIN_MAX_FETCH_ATTEMPTS);
        assert_eq!(attempt_bounds::MAX, MAX_MAX_FETCH_ATTEMPTS);
        assert_eq!(attempt_bounds::DEFAULT, DEFAULT_MAX_FETCH_ATTEMPTS);
    }

    #[test]
    fn zoom_scale_clamps() {
        assert!((ZoomScale::new(0.3).value() - 1.0).abs() < f32::EPSILON);
        assert!((ZoomScale::new(9.0).value() - 4.0).abs() < f32::EPSILON);
        assert!((ZoomScale::new(2.5).value() - 2.5).abs() < f32::EPSILON);
        assert!(ZoomScale::new(f32::NAN).is_rest());
    }

    #[test]
    fn zoom_scale_rest_and_max() {
        assert!(ZoomScale::default().is_rest());
        assert!(ZoomScale::new(4.0).is_max());
        assert!(!ZoomScale::new(2.0).is_rest());
    }

    #[test]
    fn prefetch_radius_clamps() {
        assert_eq!(PrefetchRadius::new(100).value(), prefetch_bounds::MAX);
        assert!(PrefetchRadius::new(0).is_disabled());
    }

    #[test]
    fn max_fetch_attempts_clamps() {
        assert_eq!(MaxFetchAttempts::new(0).value(), attempt_bounds::MIN);
        assert_eq!(MaxFetchAttempts::new(50).value(), attempt_bounds::MAX);
        assert_eq!(MaxFetchAttempts::default().value(), 3);
    }
}
