// SPDX-License-Identifier: MPL-2.0
//! Analytics sinks.
//!
//! - [`ChannelAnalytics`] forwards events to a bounded channel consumed by the
//!   host (batching uploader, test assertions)
//! - [`TracingAnalytics`] renders events as structured log records

use crate::application::port::{AnalyticsEvent, AnalyticsSink};
use crate::config::ViewerSettings;
use crate::domain::gallery::ItemId;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

/// Sink that forwards events to a bounded channel.
///
/// Sending never blocks: when the channel is full the event is dropped
/// (backpressure protection).
#[derive(Debug, Clone)]
pub struct ChannelAnalytics {
    event_tx: Sender<AnalyticsEvent>,
}

impl ChannelAnalytics {
    /// Creates a sink and the receiver that drains it.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Receiver<AnalyticsEvent>) {
        let (event_tx, event_rx) = mpsc::channel(capacity.max(1));
        (Self { event_tx }, event_rx)
    }

    /// Creates a sink sized by `[viewer] analytics_channel_capacity`.
    #[must_use]
    pub fn from_settings(settings: &ViewerSettings) -> (Self, Receiver<AnalyticsEvent>) {
        Self::new(settings.analytics_channel_capacity)
    }
}

impl AnalyticsSink for ChannelAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::debug!(event = event.kind.name(), "analytics channel full, event dropped");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

/// Sink that logs every event at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(
            target: "gallery_lens::analytics",
            event = event.kind.name(),
            store = %event.store_id,
            item = event.item_id.as_ref().map(ItemId::as_str),
            category = event.category.as_deref(),
            tags = ?event.tags,
            index = event.index,
            "analytics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::AnalyticsEventKind;
    use crate::domain::gallery::StoreId;

    fn event() -> AnalyticsEvent {
        AnalyticsEvent::new(AnalyticsEventKind::SectionViewed, StoreId::new("s"))
    }

    #[test]
    fn events_reach_the_receiver() {
        let (sink, mut rx) = ChannelAnalytics::new(4);
        sink.track(event());
        let received = rx.try_recv().expect("event delivered");
        assert_eq!(received.kind, AnalyticsEventKind::SectionViewed);
    }

    #[test]
    fn full_channel_drops_events() {
        let (sink, mut rx) = ChannelAnalytics::new(1);
        sink.track(event());
        sink.track(event());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn settings_size_the_channel() {
        let settings = ViewerSettings {
            analytics_channel_capacity: 2,
            ..ViewerSettings::default()
        };
        let (sink, mut rx) = ChannelAnalytics::from_settings(&settings);
        for _ in 0..3 {
            sink.track(event());
        }
        assert_eq!(rx.len(), 2);
    }

    #[test]
    fn closed_channel_is_silent() {
        let (sink, rx) = ChannelAnalytics::new(1);
        drop(rx);
        sink.track(event());
    }

    #[test]
    fn tracing_sink_accepts_events() {
        TracingAnalytics.track(event().with_tags(["spicy"]).with_index(2));
    }
}
