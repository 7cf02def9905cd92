// SPDX-License-Identifier: MPL-2.0
//! Gesture arbitration
//!
//! A touch sequence is claimed by exactly one of two recognizers: the
//! double-tap recognizer, or the simultaneous pinch + pan group. Pinch and pan
//! may run together; a double-tap never mixes with either.
//!
//! A sequence is delimited by `TouchDown`/`TouchUp`. Hosts that do not report
//! touch boundaries still get correct arbitration: the claim is released as
//! soon as the owning gesture completes.

/// Raw gesture input reported by the host's recognizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    /// First finger went down.
    TouchDown,
    /// Last finger went up.
    TouchUp,
    PinchStart { focal_x: f32, focal_y: f32 },
    /// Scale factor, cumulative since `PinchStart`.
    PinchUpdate { factor: f32 },
    PinchEnd,
    PanStart,
    /// Translation, cumulative since `PanStart`.
    PanUpdate { dx: f32, dy: f32 },
    PanEnd,
    DoubleTap,
}

/// Recognizer owning the current touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Claim {
    #[default]
    Unclaimed,
    DoubleTap,
    /// Pinch and/or pan.
    Continuous,
}

/// Decides which inputs reach the transform state.
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    claim: Claim,
    touching: bool,
    pinch_active: bool,
    pan_active: bool,
}

impl GestureArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn claim(&self) -> Claim {
        self.claim
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_active
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_active
    }

    /// Returns `true` if `input` should be applied to the transform.
    ///
    /// Touch boundaries are bookkeeping only and never admitted.
    pub fn admit(&mut self, input: GestureInput) -> bool {
        match input {
            GestureInput::TouchDown => {
                self.touching = true;
                self.claim = Claim::Unclaimed;
                false
            }
            GestureInput::TouchUp => {
                self.touching = false;
                if !self.pinch_active && !self.pan_active {
                    self.claim = Claim::Unclaimed;
                }
                false
            }
            GestureInput::DoubleTap => {
                if self.claim != Claim::Unclaimed {
                    return false;
                }
                if self.touching {
                    self.claim = Claim::DoubleTap;
                }
                true
            }
            GestureInput::PinchStart { .. } => {
                if !self.claim_continuous() {
                    return false;
                }
                self.pinch_active = true;
                true
            }
            GestureInput::PanStart => {
                if !self.claim_continuous() {
                    return false;
                }
                self.pan_active = true;
                true
            }
            GestureInput::PinchUpdate { .. } => self.pinch_active,
            GestureInput::PanUpdate { .. } => self.pan_active,
            GestureInput::PinchEnd => {
                let admitted = self.pinch_active;
                self.pinch_active = false;
                self.release_if_idle();
                admitted
            }
            GestureInput::PanEnd => {
                let admitted = self.pan_active;
                self.pan_active = false;
                self.release_if_idle();
                admitted
            }
        }
    }

    /// Forgets any in-progress gesture (displayed item changed).
    pub fn reset(&mut self) {
        *self = Self {
            touching: self.touching,
            ..Self::default()
        };
    }

    fn claim_continuous(&mut self) -> bool {
        match self.claim {
            Claim::DoubleTap => false,
            Claim::Unclaimed | Claim::Continuous => {
                self.claim = Claim::Continuous;
                true
            }
        }
    }

    fn release_if_idle(&mut self) {
        if !self.touching && !self.pinch_active && !self.pan_active {
            self.claim = Claim::Unclaimed;
        }
    }
}
