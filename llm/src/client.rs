//! HTTP client for interacting with an Ollama language model server.
//!
//! [`OllamaClient`] implements [`ChatModel`] by rendering the history window
//! with [`compose_prompt`] and streaming the completion.

use crate::prompt::compose_prompt;
use crate::traits::{ChatModel, LLMError, ReplyStream};
use async_trait::async_trait;
use history::Message;
use tokio_stream::StreamExt;

use ollama_rs::{generation::completion::request::GenerationRequest, Ollama};

pub struct OllamaClient {
    inner: Ollama,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl AsRef<str>, model: impl Into<String>) -> Result<Self, LLMError> {
        let inner =
            Ollama::try_new(base_url.as_ref()).map_err(|e| LLMError::Network(e.to_string()))?;
        Ok(Self {
            inner,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn stream_chat(
        &self,
        history: &[Message],
        input: &str,
    ) -> Result<ReplyStream, LLMError> {
        let req = GenerationRequest::new(self.model.clone(), compose_prompt(history, input));
        let stream = self
            .inner
            .generate_stream(req)
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        let mapped = stream.map(|res| {
            res.map_err(|e| LLMError::Network(e.to_string()))
                .map(|chunk| {
                    chunk
                        .into_iter()
                        .map(|c| c.response)
                        .collect::<Vec<_>>()
                        .join("")
                })
        });
        Ok(Box::pin(mapped))
    }
}
