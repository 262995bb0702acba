//! Reply generation on top of a conversation history.
//!
//! The `llm` crate defines a [`ChatModel`] trait along with an
//! [`OllamaClient`] implementation, and [`respond`], which answers a human
//! turn and records the exchange through a [`history::GuardedAppender`] so
//! that replies to cleared turns never reach the store.

pub mod client;
pub mod prompt;
pub mod runner;
pub mod traits;

pub use client::OllamaClient;
pub use prompt::compose_prompt;
pub use runner::{client_from_env, generate, model_from_env, respond};
pub use traits::{ChatModel, LLMError, ReplyStream};
