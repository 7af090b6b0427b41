//! Transcript entities

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a conversation. Never modified after it has been appended.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Message {
        Message::now(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Message {
        Message::now(Role::Assistant, content)
    }

    fn now(role: Role, content: impl Into<String>) -> Message {
        Message {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
