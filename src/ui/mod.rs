// SPDX-License-Identifier: MPL-2.0
//! Presentation-side state.
//!
//! Rendering belongs to the host; this module only holds the state the
//! renderer reads.
//!
//! - [`state`] - Gesture arbitration, per-image transform and display sizing

pub mod state;
