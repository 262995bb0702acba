use crate::traits::{ChatModel, LLMError};
use crate::OllamaClient;
use history::{BoundedHistoryStore, ChatHistory, GuardedAppender, Message, Turn};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{debug, info};

/// Read the window from `history` and collect the model's streamed reply.
pub async fn generate<M: ChatModel + ?Sized>(
    model: &M,
    history: &dyn ChatHistory,
    input: &str,
) -> Result<String, LLMError> {
    let context = history.messages().await;
    debug!(context = context.len(), "generating reply");
    let mut stream = model.stream_chat(&context, input).await?;
    let mut reply = String::new();
    while let Some(chunk) = stream.next().await {
        reply.push_str(&chunk?);
    }
    Ok(reply)
}

/// Answer `turn` and record the exchange in `store`.
///
/// Returns `None` when the turn was cleared before the reply finished; the
/// store is then left as the clear left it.
pub async fn respond<M: ChatModel + ?Sized>(
    model: &M,
    store: Arc<BoundedHistoryStore>,
    turn: Turn,
) -> Result<Option<String>, LLMError> {
    let gate = GuardedAppender::new(store, turn);
    let reply = generate(model, &gate, &gate.turn().body).await?;
    let exchange = vec![gate.turn().message(), Message::assistant(reply.clone())];
    if gate.commit(exchange).await? {
        Ok(Some(reply))
    } else {
        info!(turn = %gate.turn().id, "turn cleared while replying; reply discarded");
        Ok(None)
    }
}

/// Create an [`OllamaClient`] from `OLLAMA_URL` and `OLLAMA_MODEL`.
pub fn client_from_env() -> Result<OllamaClient, LLMError> {
    let url = std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());
    OllamaClient::new(url, model_from_env())
}

/// Read the chat model name from the `OLLAMA_MODEL` environment variable.
pub fn model_from_env() -> String {
    std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "gemma3:27b".into())
}
