//! Messages, turns and the identifiers that tie them together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
}

/// Opaque identifier of a human turn.
///
/// Identifiers are only ever compared for equality. [`TurnId::new`] draws a
/// random v4 UUID; callers that already own an identity (a chat document's
/// message id, say) can convert it with `From`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TurnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TurnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single line of conversation.
///
/// `turn` names the human turn the message belongs to. Messages read from a
/// shared log carry no turn; messages committed to a
/// [`BoundedHistoryStore`](crate::BoundedHistoryStore) always do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnId>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            turn: None,
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Return this message attributed to `turn`.
    pub fn tagged(self, turn: TurnId) -> Self {
        Self {
            turn: Some(turn),
            ..self
        }
    }

    /// Whether the message names a non-empty origin turn.
    pub fn has_origin(&self) -> bool {
        self.turn.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// A message submitted by a human, awaiting a reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub submitted_at: DateTime<Utc>,
    pub body: String,
}

impl Turn {
    /// Start a turn now with a freshly generated identifier.
    pub fn new(body: impl Into<String>) -> Self {
        Self::with_id(TurnId::new(), Utc::now(), body)
    }

    pub fn with_id(id: TurnId, submitted_at: DateTime<Utc>, body: impl Into<String>) -> Self {
        Self {
            id,
            submitted_at,
            body: body.into(),
        }
    }

    /// The human side of the exchange, not yet tagged.
    pub fn message(&self) -> Message {
        Message::human(self.body.clone())
    }
}
