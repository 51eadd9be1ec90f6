//! Event hub and broadcast logger
//!
//! Fans match events out to every observer (UI bridges, room sockets,
//! spectator streams). The channel is capacity-bounded with overflow
//! enabled, so a slow observer loses old events instead of stalling the
//! match.

use std::sync::Arc;

use async_broadcast::{InactiveReceiver, Receiver, Sender};
use futures::Stream;
use serde::Serialize;
use uuid::Uuid;

use super::MatchLogger;

/// One observable match event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub match_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Additional data fields, flattened into the root
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub timestamp: i64,
}

impl MatchEvent {
    pub fn new(event_type: &str, match_id: Option<Uuid>) -> Self {
        Self {
            event_type: event_type.to_string(),
            match_id,
            message: None,
            data: serde_json::Value::Object(serde_json::Map::new()),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Broadcast channel for match events.
pub struct EventHub {
    sender: Sender<MatchEvent>,
    /// Keeps the channel open while no observer is subscribed
    _keepalive: InactiveReceiver<MatchEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (mut sender, receiver) = async_broadcast::broadcast(capacity);
        sender.set_overflow(true);
        Self {
            sender,
            _keepalive: receiver.deactivate(),
        }
    }

    pub fn subscribe(&self) -> Receiver<MatchEvent> {
        self.sender.new_receiver()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publish an event to all current observers.
    pub fn publish(&self, event: MatchEvent) {
        tracing::debug!(
            "broadcasting event '{}' to {} receivers",
            event.event_type,
            self.sender.receiver_count()
        );
        match self.sender.try_broadcast(event) {
            Ok(None) => {}
            Ok(Some(dropped)) => {
                tracing::debug!("event overflow, dropped '{}'", dropped.event_type);
            }
            Err(e) => {
                tracing::warn!("failed to broadcast event: {:?}", e);
            }
        }
    }

    /// Serialized event stream for transport adapters.
    pub fn json_stream(&self) -> impl Stream<Item = String> {
        let mut receiver = self.subscribe();
        async_stream::stream! {
            while let Ok(event) = receiver.recv().await {
                match serde_json::to_string(&event) {
                    Ok(json) => yield json,
                    Err(e) => tracing::warn!("failed to serialize event: {}", e),
                }
            }
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Narrative logger that fans lines out through an [`EventHub`], followed
/// by a state-refresh marker so pull-based observers re-fetch a snapshot.
pub struct BroadcastLogger {
    hub: Arc<EventHub>,
    match_id: Uuid,
}

impl BroadcastLogger {
    pub fn new(hub: Arc<EventHub>, match_id: Uuid) -> Self {
        Self { hub, match_id }
    }
}

impl MatchLogger for BroadcastLogger {
    fn log(&self, message: &str) {
        self.hub
            .publish(MatchEvent::new("log", Some(self.match_id)).with_message(message));
        self.hub
            .publish(MatchEvent::new("stateRefresh", Some(self.match_id)));
    }

    fn close(&self) {
        self.hub
            .publish(MatchEvent::new("matchClosed", Some(self.match_id)));
    }
}
