//! In-memory conversation history for a single console session.
//!
//! A [`ConversationSession`] always starts with exactly one `system` message
//! and only ever grows by appending `user` / `assistant` messages. Nothing is
//! persisted; the session is dropped with the process.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
}

/// Author of a message, serialized as the lowercase chat-completions role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(SessionError::InvalidRole(other.to_string())),
        }
    }
}

/// One immutable entry of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
pub struct ConversationSession {
    messages: Vec<Message>,
}

impl ConversationSession {
    /// Start a session seeded with `system_prompt` at index 0.
    pub fn create(system_prompt: impl Into<String>) -> Self {
        Self { messages: vec![Message::new(Role::System, system_prompt)] }
    }

    /// Append a message at the tail.
    ///
    /// The system message is fixed at creation; appending another one is a
    /// contract violation and is rejected like an unknown role.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<&Message, SessionError> {
        if role == Role::System {
            return Err(SessionError::InvalidRole(role.to_string()));
        }
        self.messages.push(Message::new(role, content));
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Append using a wire role string (`"user"`, `"assistant"`).
    pub fn append_raw(&mut self, role: &str, content: impl Into<String>) -> Result<&Message, SessionError> {
        let role = role.parse::<Role>()?;
        self.append(role, content)
    }

    /// Full history in insertion order, system message first.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// History without the system message, as shown to the user.
    pub fn transcript(&self) -> &[Message] {
        &self.messages[1..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
