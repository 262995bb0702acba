use history::LogEntry;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Change notifications published by a [`ChatLog`](crate::ChatLog).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum LogEvent {
    /// `entry` was appended at position `index`.
    Appended { index: usize, entry: LogEntry },
}

/// Simple broadcast channel for log events.
#[derive(Clone)]
pub struct LogBus {
    tx: broadcast::Sender<LogEvent>,
}

impl LogBus {
    /// Create a new bus buffering `capacity` events, at least one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an event; having no subscribers is not an error.
    pub fn send(&self, event: LogEvent) {
        let _ = self.tx.send(event);
    }
}
