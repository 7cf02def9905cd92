// SPDX-License-Identifier: MPL-2.0
//! Media loading concerns that sit beside the viewer.
//!
//! Decoding and caching belong to the host; this module only decides which
//! media should be warmed ahead of display.

pub mod prefetch;

// Re-export commonly used types
pub use prefetch::{prefetch_window, PrefetchConfig, PrefetchController, PrefetchStats};
