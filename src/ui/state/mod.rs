// SPDX-License-Identifier: MPL-2.0
//! Gesture and transform state
//!
//! This module contains the per-image transform logic, kept apart from the
//! viewer controller so it can run on its own task.

pub mod arbiter;
pub mod transform;
pub mod viewport;
pub mod worker;

// Re-export commonly used types for convenience
pub use arbiter::{Claim, GestureArbiter, GestureInput};
pub use transform::{Animation, Spring, TransformOptions, TransformSnapshot, TransformState};
pub use viewport::{DisplayArea, Size};
pub use worker::{spawn_gesture_worker, GestureCommand, GestureEngine, GestureHandle};
