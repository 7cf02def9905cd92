// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Scale bounds and the double-tap zoom level
//! - **Spring**: Snap-back and double-tap animation parameters
//! - **Prefetch**: Window radius and remembered URL capacity
//! - **Retry**: Bounded backoff for gallery and category loads
//! - **Gallery**: Default fetch query
//! - **Viewer**: Info panel fade and analytics buffering

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Scale of an image at rest (fitted to its display area).
pub const MIN_ZOOM_SCALE: f32 = 1.0;

/// Maximum pinch zoom.
pub const MAX_ZOOM_SCALE: f32 = 4.0;

/// Fixed zoom reached by a double-tap from rest.
pub const DOUBLE_TAP_ZOOM_SCALE: f32 = 2.0;

// ==========================================================================
// Spring Defaults
// ==========================================================================

/// Default spring damping for snap-back and double-tap animations.
pub const DEFAULT_SPRING_DAMPING: f32 = 15.0;

/// Default spring stiffness for snap-back and double-tap animations.
pub const DEFAULT_SPRING_STIFFNESS: f32 = 150.0;

// ==========================================================================
// Prefetch Defaults
// ==========================================================================

/// Default number of items to prefetch on each side of the current index.
pub const DEFAULT_PREFETCH_RADIUS: usize = 2;

/// Minimum prefetch radius (0 disables prefetching).
pub const MIN_PREFETCH_RADIUS: usize = 0;

/// Maximum prefetch radius.
pub const MAX_PREFETCH_RADIUS: usize = 10;

/// Default number of already-warmed URLs remembered per session.
pub const DEFAULT_PREFETCH_MEMORY: usize = 64;

/// Minimum number of remembered URLs.
pub const MIN_PREFETCH_MEMORY: usize = 8;

/// Maximum number of remembered URLs.
pub const MAX_PREFETCH_MEMORY: usize = 512;

// ==========================================================================
// Retry Defaults
// ==========================================================================

/// Default number of automatic attempts for a critical load.
pub const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 3;

/// Minimum number of attempts.
pub const MIN_MAX_FETCH_ATTEMPTS: u32 = 1;

/// Maximum number of attempts.
pub const MAX_MAX_FETCH_ATTEMPTS: u32 = 10;

/// Base backoff delay in milliseconds; attempt `n` waits `n × base`.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 2_000;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default number of items requested from the gallery service.
pub const DEFAULT_GALLERY_LIMIT: u32 = 50;

/// Upper bound on the gallery request size.
pub const MAX_GALLERY_LIMIT: u32 = 200;

// ==========================================================================
// Viewer Defaults
// ==========================================================================

/// Duration of the info panel fade in milliseconds.
pub const DEFAULT_INFO_FADE_MS: u64 = 200;

/// Capacity of the channel-backed analytics sink.
pub const DEFAULT_ANALYTICS_CHANNEL_CAPACITY: usize = 256;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_ZOOM_SCALE > 0.0);
    assert!(MAX_ZOOM_SCALE > MIN_ZOOM_SCALE);
    assert!(DOUBLE_TAP_ZOOM_SCALE > MIN_ZOOM_SCALE);
    assert!(DOUBLE_TAP_ZOOM_SCALE <= MAX_ZOOM_SCALE);

    // Spring validation
    assert!(DEFAULT_SPRING_DAMPING > 0.0);
    assert!(DEFAULT_SPRING_STIFFNESS > 0.0);

    // Prefetch validation
    assert!(MAX_PREFETCH_RADIUS >= MIN_PREFETCH_RADIUS);
    assert!(DEFAULT_PREFETCH_RADIUS >= MIN_PREFETCH_RADIUS);
    assert!(DEFAULT_PREFETCH_RADIUS <= MAX_PREFETCH_RADIUS);
    assert!(MIN_PREFETCH_MEMORY > 0);
    assert!(DEFAULT_PREFETCH_MEMORY >= MIN_PREFETCH_MEMORY);
    assert!(DEFAULT_PREFETCH_MEMORY <= MAX_PREFETCH_MEMORY);
    assert!(MAX_PREFETCH_MEMORY >= 2 * MAX_PREFETCH_RADIUS + 1);

    // Retry validation
    assert!(MIN_MAX_FETCH_ATTEMPTS > 0);
    assert!(DEFAULT_MAX_FETCH_ATTEMPTS >= MIN_MAX_FETCH_ATTEMPTS);
    assert!(DEFAULT_MAX_FETCH_ATTEMPTS <= MAX_MAX_FETCH_ATTEMPTS);

    // Gallery validation
    assert!(DEFAULT_GALLERY_LIMIT > 0);
    assert!(DEFAULT_GALLERY_LIMIT <= MAX_GALLERY_LIMIT);

    assert!(DEFAULT_ANALYTICS_CHANNEL_CAPACITY > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(MIN_ZOOM_SCALE, 1.0);
        assert_eq!(MAX_ZOOM_SCALE, 4.0);
        assert_eq!(DOUBLE_TAP_ZOOM_SCALE, 2.0);
    }

    #[test]
    fn retry_defaults_match_backoff_contract() {
        assert_eq!(DEFAULT_MAX_FETCH_ATTEMPTS, 3);
        assert_eq!(DEFAULT_RETRY_BASE_DELAY_MS, 2_000);
    }

    #[test]
    fn prefetch_defaults_are_valid() {
        assert!(DEFAULT_PREFETCH_RADIUS <= MAX_PREFETCH_RADIUS);
        assert!(DEFAULT_PREFETCH_MEMORY >= MIN_PREFETCH_MEMORY);
    }
}
