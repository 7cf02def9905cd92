// SPDX-License-Identifier: MPL-2.0
//! Gesture worker task
//!
//! Gesture recognition runs off the UI event loop. The worker owns the
//! [`TransformState`] and publishes every resulting [`TransformSnapshot`]
//! through a watch channel, so the renderer only ever observes the latest
//! transform of a frame.

use super::arbiter::{GestureArbiter, GestureInput};
use super::transform::{TransformOptions, TransformSnapshot, TransformState};
use super::viewport::DisplayArea;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Message processed by the gesture worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    Input(GestureInput),
    /// Return to rest immediately; the displayed item changed.
    Reset,
    SetDisplayArea(DisplayArea),
    Shutdown,
}

/// Arbiter and transform combined; the synchronous core of the worker.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    arbiter: GestureArbiter,
    transform: TransformState,
}

impl GestureEngine {
    #[must_use]
    pub fn new(options: TransformOptions, display: DisplayArea) -> Self {
        Self {
            arbiter: GestureArbiter::new(),
            transform: TransformState::new(options, display),
        }
    }

    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Applies one command, returning the snapshot to publish if it changed
    /// anything the renderer should see.
    pub fn apply(&mut self, command: GestureCommand) -> Option<TransformSnapshot> {
        match command {
            GestureCommand::Input(input) => self.apply_input(input),
            GestureCommand::Reset => {
                self.arbiter.reset();
                Some(self.transform.reset())
            }
            GestureCommand::SetDisplayArea(area) => Some(self.transform.set_display_area(area)),
            GestureCommand::Shutdown => None,
        }
    }

    fn apply_input(&mut self, input: GestureInput) -> Option<TransformSnapshot> {
        if !self.arbiter.admit(input) {
            return None;
        }
        match input {
            GestureInput::PinchStart { focal_x, focal_y } => {
                Some(self.transform.pinch_start(focal_x, focal_y))
            }
            GestureInput::PinchUpdate { factor } => Some(self.transform.pinch_update(factor)),
            GestureInput::PinchEnd => Some(self.transform.pinch_end()),
            GestureInput::PanUpdate { dx, dy } => self.transform.pan_update(dx, dy),
            GestureInput::PanEnd => Some(self.transform.pan_end()),
            GestureInput::DoubleTap => Some(self.transform.double_tap()),
            GestureInput::PanStart | GestureInput::TouchDown | GestureInput::TouchUp => None,
        }
    }
}

/// Handle to a running gesture worker.
///
/// Dropping the handle closes the command channel, which stops the worker.
#[derive(Debug)]
pub struct GestureHandle {
    commands: mpsc::UnboundedSender<GestureCommand>,
    snapshots: watch::Receiver<TransformSnapshot>,
    task: JoinHandle<()>,
}

impl GestureHandle {
    /// Forwards a recognizer input. Ignored once the worker has stopped.
    pub fn send(&self, input: GestureInput) {
        self.command(GestureCommand::Input(input));
    }

    pub fn reset(&self) {
        self.command(GestureCommand::Reset);
    }

    pub fn set_display_area(&self, area: DisplayArea) {
        self.command(GestureCommand::SetDisplayArea(area));
    }

    /// Asks the worker to stop after processing queued commands.
    pub fn shutdown(&self) {
        self.command(GestureCommand::Shutdown);
    }

    /// Latest published transform.
    #[must_use]
    pub fn latest(&self) -> TransformSnapshot {
        *self.snapshots.borrow()
    }

    /// A receiver for renderers that want change notifications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TransformSnapshot> {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn command(&self, command: GestureCommand) {
        if self.commands.send(command).is_err() {
            tracing::trace!(?command, "gesture worker stopped, command dropped");
        }
    }
}

/// Spawns the gesture worker on the current tokio runtime.
#[must_use]
pub fn spawn_gesture_worker(options: TransformOptions, display: DisplayArea) -> GestureHandle {
    let (commands, mut inbox) = mpsc::unbounded_channel();
    let (publisher, snapshots) = watch::channel(TransformSnapshot::REST);
    let mut engine = GestureEngine::new(options, display);

    let task = tokio::spawn(async move {
        while let Some(command) = inbox.recv().await {
            if command == GestureCommand::Shutdown {
                break;
            }
            if let Some(snapshot) = engine.apply(command) {
                publisher.send_replace(snapshot);
            }
        }
        tracing::trace!("gesture worker stopped");
    });

    GestureHandle {
        commands,
        snapshots,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::viewport::Size;

    fn engine() -> GestureEngine {
        GestureEngine::new(
            TransformOptions::default(),
            DisplayArea::fallback(Size::new(400.0, 800.0)),
        )
    }

    #[test]
    fn pan_start_publishes_nothing() {
        let mut engine = engine();
        assert!(engine
            .apply(GestureCommand::Input(GestureInput::PanStart))
            .is_none());
    }

    #[test]
    fn rejected_inputs_publish_nothing() {
        let mut engine = engine();
        engine.apply(GestureCommand::Input(GestureInput::TouchDown));
        engine.apply(GestureCommand::Input(GestureInput::DoubleTap));
        let rejected = engine.apply(GestureCommand::Input(GestureInput::PinchStart {
            focal_x: 0.0,
            focal_y: 0.0,
        }));
        assert!(rejected.is_none());
        assert_eq!(engine.transform().scale(), 2.0);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut engine = engine();
        engine.apply(GestureCommand::Input(GestureInput::DoubleTap));
        let snap = engine.apply(GestureCommand::Reset).expect("published");
        assert!(snap.is_rest());
    }

    #[tokio::test]
    async fn worker_publishes_latest_snapshot() {
        let handle = spawn_gesture_worker(
            TransformOptions::default(),
            DisplayArea::fallback(Size::new(400.0, 800.0)),
        );
        let mut rx = handle.subscribe();

        handle.send(GestureInput::DoubleTap);
        let snap = *rx
            .wait_for(|s| s.scale == 2.0)
            .await
            .expect("worker alive");
        assert_eq!(snap.translate_x, 0.0);

        handle.reset();
        rx.wait_for(|s| s.is_rest()).await.expect("worker alive");
        assert!(handle.latest().is_rest());
    }

    #[tokio::test]
    async fn shutdown_stops_the_worker() {
        let handle = spawn_gesture_worker(TransformOptions::default(), DisplayArea::default());
        let mut rx = handle.subscribe();
        handle.shutdown();
        // The sender side is dropped when the task ends.
        while rx.changed().await.is_ok() {}
        handle.send(GestureInput::DoubleTap);
        assert!(handle.latest().is_rest());
    }
}
