use async_trait::async_trait;
use thiserror::Error;

use crate::message::{Message, TurnId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The message carried no origin turn. Only a
    /// [`GuardedAppender`](crate::GuardedAppender) may populate a store.
    #[error("message must carry an origin turn id to be added to the store")]
    InvalidAppend,
    #[error("operation not supported: {0}")]
    UnsupportedOperation(&'static str),
}

/// The capability set shared by every history backend.
///
/// Reply pipelines hold an `Arc<dyn ChatHistory>` and stay agnostic to
/// whether it is a read-only window over a shared log, a bounded store, or a
/// per-turn gate in front of one.
#[async_trait]
pub trait ChatHistory: Send + Sync {
    /// The current context window, oldest first.
    async fn messages(&self) -> Vec<Message>;

    async fn append(&self, message: Message) -> Result<(), HistoryError>;

    /// Append several messages in order, stopping at the first failure.
    async fn append_all(&self, messages: Vec<Message>) -> Result<(), HistoryError> {
        for message in messages {
            self.append(message).await?;
        }
        Ok(())
    }

    /// Drop the exchanges of `turns`, or everything when `turns` is `None`.
    async fn clear(&self, turns: Option<&[TurnId]>) -> Result<(), HistoryError>;
}
