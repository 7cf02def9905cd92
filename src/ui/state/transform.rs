// SPDX-License-Identifier: MPL-2.0
//! Per-image zoom/pan transform state
//!
//! This module handles the transform of the displayed image, including:
//! - Pinch zoom with clamping to 1×–4× and snap-back below rest
//! - Pan while zoomed, optionally bounded to the display area
//! - Double-tap toggle between rest and a fixed zoom
//!
//! Every operation returns the [`TransformSnapshot`] the renderer should move
//! to, together with the animation that carries it there.

use super::viewport::DisplayArea;
use crate::config::GestureConfig;
use crate::domain::ui::ZoomScale;

/// Spring parameters for animated transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub damping: f32,
    pub stiffness: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            damping: crate::config::DEFAULT_SPRING_DAMPING,
            stiffness: crate::config::DEFAULT_SPRING_STIFFNESS,
        }
    }
}

/// How the renderer reaches a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Animation {
    /// Jump directly (gesture tracking, resets).
    #[default]
    Immediate,
    /// Spring toward the target (snap-back, double-tap).
    Spring(Spring),
}

/// Immutable per-frame transform handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub animation: Animation,
}

impl TransformSnapshot {
    /// The rest transform, applied without animation.
    pub const REST: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        animation: Animation::Immediate,
    };

    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.scale == 1.0 && self.translate_x == 0.0 && self.translate_y == 0.0
    }
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::REST
    }
}

/// Tunables of the transform engine, taken from `[gesture]` settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    pub double_tap_scale: ZoomScale,
    pub clamp_pan: bool,
    pub spring: Spring,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

impl From<&GestureConfig> for TransformOptions {
    fn from(config: &GestureConfig) -> Self {
        Self {
            double_tap_scale: ZoomScale::new(config.double_tap_scale),
            clamp_pan: config.clamp_pan,
            spring: Spring {
                damping: config.spring_damping,
                stiffness: config.spring_stiffness,
            },
        }
    }
}

/// Transform of the currently displayed image.
#[derive(Debug, Clone)]
pub struct TransformState {
    scale: ZoomScale,
    translate_x: f32,
    translate_y: f32,

    /// Values persisted at the end of the last gesture.
    saved_scale: ZoomScale,
    saved_translate_x: f32,
    saved_translate_y: f32,

    /// Focal point recorded when the current pinch started.
    focal_x: f32,
    focal_y: f32,

    /// Unclamped `saved_scale × factor` of the current pinch.
    raw_scale: f32,

    display: DisplayArea,
    options: TransformOptions,
}

impl TransformState {
    #[must_use]
    pub fn new(options: TransformOptions, display: DisplayArea) -> Self {
        Self {
            scale: ZoomScale::REST,
            translate_x: 0.0,
            translate_y: 0.0,
            saved_scale: ZoomScale::REST,
            saved_translate_x: 0.0,
            saved_translate_y: 0.0,
            focal_x: 0.0,
            focal_y: 0.0,
            raw_scale: 1.0,
            display,
            options,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    #[must_use]
    pub fn translation(&self) -> (f32, f32) {
        (self.translate_x, self.translate_y)
    }

    #[must_use]
    pub fn saved_scale(&self) -> f32 {
        self.saved_scale.value()
    }

    #[must_use]
    pub fn saved_translation(&self) -> (f32, f32) {
        (self.saved_translate_x, self.saved_translate_y)
    }

    #[must_use]
    pub fn focal_point(&self) -> (f32, f32) {
        (self.focal_x, self.focal_y)
    }

    #[must_use]
    pub fn display_area(&self) -> DisplayArea {
        self.display
    }

    /// Current transform, without animation.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        self.snapshot_with(Animation::Immediate)
    }

    fn snapshot_with(&self, animation: Animation) -> TransformSnapshot {
        TransformSnapshot {
            scale: self.scale.value(),
            translate_x: self.translate_x,
            translate_y: self.translate_y,
            animation,
        }
    }

    /// Replaces the display area (natural size became known, viewport resized).
    pub fn set_display_area(&mut self, display: DisplayArea) -> TransformSnapshot {
        self.display = display;
        self.clamp_translation();
        self.saved_translate_x = self.translate_x;
        self.saved_translate_y = self.translate_y;
        self.snapshot()
    }

    /// Returns to rest immediately (used when a different item is shown).
    pub fn reset(&mut self) -> TransformSnapshot {
        self.to_rest();
        self.snapshot()
    }

    // -------------------------------------------------------------------------
    // Pinch
    // -------------------------------------------------------------------------

    pub fn pinch_start(&mut self, focal_x: f32, focal_y: f32) -> TransformSnapshot {
        self.focal_x = focal_x;
        self.focal_y = focal_y;
        self.raw_scale = self.saved_scale.value();
        self.snapshot()
    }

    /// `factor` is cumulative since the pinch started.
    pub fn pinch_update(&mut self, factor: f32) -> TransformSnapshot {
        if !factor.is_finite() {
            return self.snapshot();
        }
        self.raw_scale = self.saved_scale.value() * factor;
        self.scale = ZoomScale::new(self.raw_scale);
        self.clamp_translation();
        self.snapshot()
    }

    /// Persists the scale, or springs back to rest if the pinch ended below 1×.
    pub fn pinch_end(&mut self) -> TransformSnapshot {
        if self.raw_scale < 1.0 {
            self.to_rest();
            return self.snapshot_with(Animation::Spring(self.options.spring));
        }
        self.saved_scale = self.scale;
        self.raw_scale = self.scale.value();
        self.saved_translate_x = self.translate_x;
        self.saved_translate_y = self.translate_y;
        self.snapshot()
    }

    // -------------------------------------------------------------------------
    // Pan
    // -------------------------------------------------------------------------

    /// Returns `true` if panning is possible (the image is zoomed in).
    #[must_use]
    pub fn can_pan(&self) -> bool {
        !self.scale.is_rest()
    }

    /// Moves by the cumulative gesture delta. Ignored at rest.
    pub fn pan_update(&mut self, delta_x: f32, delta_y: f32) -> Option<TransformSnapshot> {
        if !self.can_pan() || !delta_x.is_finite() || !delta_y.is_finite() {
            return None;
        }
        self.translate_x = self.saved_translate_x + delta_x;
        self.translate_y = self.saved_translate_y + delta_y;
        self.clamp_translation();
        Some(self.snapshot())
    }

    pub fn pan_end(&mut self) -> TransformSnapshot {
        self.saved_translate_x = self.translate_x;
        self.saved_translate_y = self.translate_y;
        self.snapshot()
    }

    // -------------------------------------------------------------------------
    // Double-tap
    // -------------------------------------------------------------------------

    /// Toggles between rest and the fixed double-tap zoom.
    pub fn double_tap(&mut self) -> TransformSnapshot {
        if self.scale.is_rest() {
            self.scale = self.options.double_tap_scale;
            self.translate_x = 0.0;
            self.translate_y = 0.0;
            self.saved_scale = self.scale;
            self.raw_scale = self.scale.value();
            self.saved_translate_x = 0.0;
            self.saved_translate_y = 0.0;
        } else {
            self.to_rest();
        }
        self.snapshot_with(Animation::Spring(self.options.spring))
    }

    fn to_rest(&mut self) {
        self.scale = ZoomScale::REST;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.saved_scale = ZoomScale::REST;
        self.saved_translate_x = 0.0;
        self.saved_translate_y = 0.0;
        self.raw_scale = 1.0;
    }

    /// Bounds the translation to the display area. Skipped while the area is
    /// unmeasured, since there is nothing to bound against.
    fn clamp_translation(&mut self) {
        if !self.options.clamp_pan || !self.display.has_extent() {
            return;
        }
        let (max_x, max_y) = self.display.max_translation(self.scale.value());
        self.translate_x = self.translate_x.clamp(-max_x, max_x);
        self.translate_y = self.translate_y.clamp(-max_y, max_y);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(TransformOptions::default(), DisplayArea::default())
    }
}
