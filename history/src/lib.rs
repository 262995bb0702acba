//! Bounded conversation history for language model prompts.
//!
//! Three backends share the [`ChatHistory`] capability set:
//!
//! - [`WindowedHistoryView`] projects the last few exchanges of an externally
//!   owned, append-only [`SharedLog`].
//! - [`BoundedHistoryStore`] owns a session's messages, each tagged with the
//!   human turn it belongs to, and supports clearing single turns or
//!   everything.
//! - [`GuardedAppender`] binds a reply to its turn and drops it if that turn
//!   was cleared while the reply was being generated.

pub mod bounded;
pub mod config;
pub mod guarded;
pub mod message;
pub mod traits;
pub mod window;

pub use bounded::BoundedHistoryStore;
pub use config::{HistoryConfig, WindowSize};
pub use guarded::GuardedAppender;
pub use message::{Message, Role, Turn, TurnId};
pub use traits::{ChatHistory, HistoryError};
pub use window::{LogEntry, SharedLog, WindowedHistoryView};
