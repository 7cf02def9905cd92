// SPDX-License-Identifier: MPL-2.0
//! Full-screen viewer.
//!
//! - [`controller`]: the carousel/grid state machine and its side effects
//! - [`state`]: per-session state and render snapshots
//! - [`tracker`]: once-per-session view deduplication
//! - [`input`]: keyboard and pointer bindings

pub mod controller;
pub mod input;
pub mod state;
pub mod tracker;

pub use controller::{
    InfoTransition, MessageOutcome, ViewerController, ViewerMessage, ViewerOptions, ViewerSummary,
    DEFAULT_SHARE_MESSAGE,
};
pub use input::{command_for_key, command_for_pointer, Key, PointerInput, ViewerCommand};
pub use state::{MediaStatus, SessionId, ViewerSnapshot, ViewerState};
pub use tracker::ViewedTracker;
