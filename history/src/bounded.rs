//! In-memory history capped at a number of exchanges.
//!
//! [`BoundedHistoryStore`] is owned by one conversation session and shared,
//! behind an `Arc`, with every [`GuardedAppender`](crate::GuardedAppender)
//! created for that session's turns. Its log, the set of invalidated turns and
//! the time of the last full reset live behind one lock so that a gate can
//! check liveness and commit in a single critical section.
//!
//! ```
//! use history::{BoundedHistoryStore, ChatHistory, Message, WindowSize};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = BoundedHistoryStore::new(WindowSize::Exchanges(1));
//! store.append(Message::human("hi").tagged("t1".into())).await.unwrap();
//! assert_eq!(store.messages().await.len(), 1);
//! assert!(store.append(Message::human("untagged")).await.is_err());
//! # });
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::config::WindowSize;
use crate::message::{Message, Turn, TurnId};
use crate::traits::{ChatHistory, HistoryError};

/// Everything guarded by the store's lock.
#[derive(Debug)]
pub(crate) struct StoreState {
    window: WindowSize,
    log: Vec<Message>,
    invalidated: HashSet<TurnId>,
    last_reset: DateTime<Utc>,
}

impl StoreState {
    fn new(window: WindowSize) -> Self {
        Self {
            window,
            log: Vec::new(),
            invalidated: HashSet::new(),
            last_reset: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// A turn may still be answered if it was submitted after the last full
    /// reset and has not been selectively cleared since.
    pub(crate) fn is_live(&self, turn: &Turn) -> bool {
        turn.submitted_at > self.last_reset && !self.invalidated.contains(&turn.id)
    }

    pub(crate) fn push(&mut self, message: Message) -> Result<(), HistoryError> {
        if !message.has_origin() {
            return Err(HistoryError::InvalidAppend);
        }
        self.log.push(message);
        Ok(())
    }

    /// Drop messages that have already slid out of the window, so that a
    /// selective clear cannot bring them back into view.
    fn evict(&mut self) {
        if let Some(limit) = self.window.message_limit() {
            let excess = self.log.len().saturating_sub(limit);
            self.log.drain(..excess);
        }
    }

    fn remove_turns(&mut self, turns: &[TurnId]) {
        self.evict();
        let before = self.log.len();
        self.log
            .retain(|m| m.turn.as_ref().map_or(true, |t| !turns.contains(t)));
        self.invalidated.extend(turns.iter().cloned());
        info!(
            removed = before - self.log.len(),
            turns = turns.len(),
            "cleared selected exchanges"
        );
    }

    fn reset(&mut self) {
        self.log.clear();
        self.invalidated.clear();
        self.last_reset = self.last_reset.max(Utc::now());
        info!(at = %self.last_reset, "cleared all history");
    }
}

pub struct BoundedHistoryStore {
    window: WindowSize,
    state: Mutex<StoreState>,
}

impl BoundedHistoryStore {
    pub fn new(window: WindowSize) -> Self {
        Self {
            window,
            state: Mutex::new(StoreState::new(window)),
        }
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// When the last full reset happened; the Unix epoch if never.
    pub async fn last_reset(&self) -> DateTime<Utc> {
        self.state.lock().await.last_reset
    }

    pub async fn is_invalidated(&self, turn: &TurnId) -> bool {
        self.state.lock().await.invalidated.contains(turn)
    }

    /// Number of messages held, including any evicted from the window but
    /// not yet dropped.
    pub async fn len(&self) -> usize {
        self.state.lock().await.log.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().await
    }
}

#[async_trait]
impl ChatHistory for BoundedHistoryStore {
    async fn messages(&self) -> Vec<Message> {
        let state = self.state.lock().await;
        self.window.tail(&state.log).to_vec()
    }

    async fn append(&self, message: Message) -> Result<(), HistoryError> {
        let mut state = self.state.lock().await;
        state.push(message)?;
        debug!(len = state.log.len(), "appended message");
        Ok(())
    }

    /// An empty list of turns counts as no list at all.
    async fn clear(&self, turns: Option<&[TurnId]>) -> Result<(), HistoryError> {
        let mut state = self.state.lock().await;
        match turns {
            Some(turns) if !turns.is_empty() => state.remove_turns(turns),
            _ => state.reset(),
        }
        Ok(())
    }
}
