//! Read-only window over an externally owned chat log.
//!
//! The log belongs to someone else (a shared chat document, for instance) and
//! only ever grows. [`WindowedHistoryView`] keeps no state of its own beyond
//! the window size: every read takes a fresh snapshot and projects the
//! trailing exchanges that precede the turn currently being answered.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::WindowSize;
use crate::message::{Message, Role, TurnId};
use crate::traits::{ChatHistory, HistoryError};

/// One raw entry of a shared log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub sender: String,
    pub body: String,
}

impl LogEntry {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

/// An append-only log owned outside this crate.
#[async_trait]
pub trait SharedLog: Send + Sync {
    /// A consistent snapshot of every entry, oldest first.
    async fn entries(&self) -> Vec<LogEntry>;
}

/// Project the window of `entries` preceding the newest one.
///
/// The newest entry is the human turn awaiting a reply and is never part of
/// its own context.
pub fn read(entries: &[LogEntry], window: WindowSize, assistant_name: &str) -> Vec<Message> {
    let Some((_, preceding)) = entries.split_last() else {
        return Vec::new();
    };
    window
        .tail(preceding)
        .iter()
        .map(|entry| {
            let role = if entry.sender == assistant_name {
                Role::Assistant
            } else {
                Role::Human
            };
            Message::new(role, entry.body.clone())
        })
        .collect()
}

pub struct WindowedHistoryView {
    log: Arc<dyn SharedLog>,
    window: WindowSize,
    assistant_name: String,
}

impl WindowedHistoryView {
    pub fn new(
        log: Arc<dyn SharedLog>,
        window: WindowSize,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            log,
            window,
            assistant_name: assistant_name.into(),
        }
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }
}

#[async_trait]
impl ChatHistory for WindowedHistoryView {
    async fn messages(&self) -> Vec<Message> {
        let entries = self.log.entries().await;
        read(&entries, self.window, &self.assistant_name)
    }

    /// Ignored: the shared log is the record of the conversation.
    async fn append(&self, _message: Message) -> Result<(), HistoryError> {
        Ok(())
    }

    async fn clear(&self, _turns: Option<&[TurnId]>) -> Result<(), HistoryError> {
        Err(HistoryError::UnsupportedOperation(
            "clear on a read-only view of a shared log",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| {
                let sender = if i % 2 == 0 { "ada" } else { "bot" };
                LogEntry::new(sender, format!("m{i}"))
            })
            .collect()
    }

    fn bodies(msgs: &[Message]) -> Vec<&str> {
        msgs.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn short_logs_yield_nothing() {
        assert!(read(&[], WindowSize::Exchanges(2), "bot").is_empty());
        assert!(read(&log(1), WindowSize::Unbounded, "bot").is_empty());
    }

    #[test]
    fn excludes_newest_entry() {
        let msgs = read(&log(4), WindowSize::Unbounded, "bot");
        assert_eq!(bodies(&msgs), ["m0", "m1", "m2"]);
    }

    #[test]
    fn keeps_last_k_exchanges_before_newest() {
        let msgs = read(&log(7), WindowSize::Exchanges(2), "bot");
        assert_eq!(bodies(&msgs), ["m2", "m3", "m4", "m5"]);
    }

    #[test]
    fn shorter_than_window_returns_all_but_newest() {
        let msgs = read(&log(3), WindowSize::Exchanges(5), "bot");
        assert_eq!(bodies(&msgs), ["m0", "m1"]);
    }

    #[test]
    fn zero_window_is_empty() {
        assert!(read(&log(5), WindowSize::Exchanges(0), "bot").is_empty());
    }

    #[test]
    fn maps_sender_to_role() {
        let msgs = read(&log(3), WindowSize::Unbounded, "bot");
        assert_eq!(msgs[0].role, Role::Human);
        assert_eq!(msgs[1].role, Role::Assistant);
        assert!(msgs.iter().all(|m| m.turn.is_none()));
    }
}
