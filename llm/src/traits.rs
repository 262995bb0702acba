use async_trait::async_trait;
use futures_core::Stream;
use history::{HistoryError, Message};
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response")]
    InvalidResponse,
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Fragments of a reply as the model produces them.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, LLMError>> + Send>>;

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Stream a reply to `input`, given the preceding conversation.
    async fn stream_chat(&self, history: &[Message], input: &str)
        -> Result<ReplyStream, LLMError>;
}
