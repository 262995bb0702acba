//! Per-turn gate in front of a [`BoundedHistoryStore`].
//!
//! A reply is generated asynchronously, and the user may clear the
//! conversation while it streams. `GuardedAppender` remembers which turn it
//! answers and commits only while that turn is still live: submitted after
//! the store's last full reset and not selectively cleared since. A reply for
//! a dead turn is dropped without error.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::bounded::BoundedHistoryStore;
use crate::message::{Message, Turn, TurnId};
use crate::traits::{ChatHistory, HistoryError};

#[derive(Clone)]
pub struct GuardedAppender {
    store: Arc<BoundedHistoryStore>,
    turn: Turn,
}

impl GuardedAppender {
    pub fn new(store: Arc<BoundedHistoryStore>, turn: Turn) -> Self {
        Self { store, turn }
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    pub fn store(&self) -> &Arc<BoundedHistoryStore> {
        &self.store
    }

    /// Whether a reply for the bound turn would be committed right now.
    pub async fn is_live(&self) -> bool {
        self.store.lock().await.is_live(&self.turn)
    }

    /// Commit every message for the bound turn, or none of them if the turn
    /// is no longer live. Returns whether the messages were committed.
    pub async fn commit(&self, messages: Vec<Message>) -> Result<bool, HistoryError> {
        let mut state = self.store.lock().await;
        if !state.is_live(&self.turn) {
            debug!(
                turn = %self.turn.id,
                dropped = messages.len(),
                "turn was cleared, dropping reply"
            );
            return Ok(false);
        }
        for message in messages {
            state.push(message.tagged(self.turn.id.clone()))?;
        }
        debug!(turn = %self.turn.id, "committed exchange");
        Ok(true)
    }
}

#[async_trait]
impl ChatHistory for GuardedAppender {
    async fn messages(&self) -> Vec<Message> {
        self.store.messages().await
    }

    async fn append(&self, message: Message) -> Result<(), HistoryError> {
        self.append_all(vec![message]).await
    }

    async fn append_all(&self, messages: Vec<Message>) -> Result<(), HistoryError> {
        self.commit(messages).await.map(|_| ())
    }

    /// Always a full reset of the underlying store.
    async fn clear(&self, turns: Option<&[TurnId]>) -> Result<(), HistoryError> {
        if turns.is_some() {
            debug!(turn = %self.turn.id, "gate ignores turn ids and resets the whole store");
        }
        self.store.clear(None).await
    }
}
