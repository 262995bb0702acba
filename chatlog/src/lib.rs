//! In-process shared chat log.
//!
//! [`ChatLog`] is an append-only record of who said what, shared between the
//! participants of a chat. It implements [`history::SharedLog`] so a
//! [`history::WindowedHistoryView`] can read prompt context straight from it,
//! and announces every append on a [`LogBus`].

pub mod bus;

use async_trait::async_trait;
use history::{LogEntry, SharedLog};
use tokio::sync::{broadcast, RwLock};
use tracing::trace;

pub use bus::{LogBus, LogEvent};

const DEFAULT_CAPACITY: usize = 64;

pub struct ChatLog {
    entries: RwLock<Vec<LogEntry>>,
    bus: LogBus,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChatLog {
    /// Create an empty log whose event bus buffers `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            bus: LogBus::new(capacity),
        }
    }

    /// Append a line and return its position.
    pub async fn push(&self, sender: impl Into<String>, body: impl Into<String>) -> usize {
        let entry = LogEntry::new(sender, body);
        let index = {
            let mut entries = self.entries.write().await;
            entries.push(entry.clone());
            entries.len() - 1
        };
        trace!(index, sender = %entry.sender, "log entry appended");
        self.bus.send(LogEvent::Appended { index, entry });
        index
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.bus.subscribe()
    }

    /// Serialize every entry as a JSON array.
    pub async fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.entries.read().await)
    }

    /// Rebuild a log from the output of [`ChatLog::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<LogEntry> = serde_json::from_str(json)?;
        Ok(Self {
            entries: RwLock::new(entries),
            bus: LogBus::new(DEFAULT_CAPACITY),
        })
    }
}

#[async_trait]
impl SharedLog for ChatLog {
    async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.clone()
    }
}
