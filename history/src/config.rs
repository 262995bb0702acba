//! Window sizing and environment-driven configuration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::bounded::BoundedHistoryStore;
use crate::window::{SharedLog, WindowedHistoryView};

pub const DEFAULT_WINDOW: usize = 2;
pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";

/// How many exchanges a history keeps in view.
///
/// Serialized as an integer exchange count, or `null` for no bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum WindowSize {
    Exchanges(usize),
    Unbounded,
}

impl WindowSize {
    /// Maximum number of messages in view: two per exchange.
    pub fn message_limit(self) -> Option<usize> {
        match self {
            WindowSize::Exchanges(k) => Some(k.saturating_mul(2)),
            WindowSize::Unbounded => None,
        }
    }

    /// The trailing slice of `messages` that falls inside the window.
    pub fn tail<T>(self, messages: &[T]) -> &[T] {
        match self.message_limit() {
            Some(limit) => &messages[messages.len().saturating_sub(limit)..],
            None => messages,
        }
    }

    /// Parse `"3"`, or `"none"`/`"unbounded"` for no bound.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("unbounded") {
            return Some(WindowSize::Unbounded);
        }
        value.parse().ok().map(WindowSize::Exchanges)
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize::Exchanges(DEFAULT_WINDOW)
    }
}

impl From<Option<usize>> for WindowSize {
    fn from(k: Option<usize>) -> Self {
        k.map_or(WindowSize::Unbounded, WindowSize::Exchanges)
    }
}

impl From<WindowSize> for Option<usize> {
    fn from(window: WindowSize) -> Self {
        match window {
            WindowSize::Exchanges(k) => Some(k),
            WindowSize::Unbounded => None,
        }
    }
}

/// Settings shared by the history backends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub window: WindowSize,
    /// Sender name that marks assistant entries in a shared log.
    pub assistant_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window: WindowSize::default(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

impl HistoryConfig {
    /// Read `HISTORY_WINDOW` and `HISTORY_ASSISTANT_NAME`, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let window = std::env::var("HISTORY_WINDOW")
            .ok()
            .and_then(|v| {
                let parsed = WindowSize::parse(&v);
                if parsed.is_none() {
                    tracing::warn!("ignoring unparsable HISTORY_WINDOW={v:?}");
                }
                parsed
            })
            .unwrap_or(defaults.window);
        let assistant_name =
            std::env::var("HISTORY_ASSISTANT_NAME").unwrap_or(defaults.assistant_name);
        Self {
            window,
            assistant_name,
        }
    }

    pub fn store(&self) -> Arc<BoundedHistoryStore> {
        Arc::new(BoundedHistoryStore::new(self.window))
    }

    pub fn view(&self, log: Arc<dyn SharedLog>) -> WindowedHistoryView {
        WindowedHistoryView::new(log, self.window, self.assistant_name.clone())
    }
}
