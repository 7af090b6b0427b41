//! In-memory transcript store

use crate::infrastructure::entities::Message;
use crate::infrastructure::traits::TranscriptStore;
use async_trait::async_trait;
use di::{inject, injectable};
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-wide transcripts, keyed by session id.
///
/// Nothing is ever evicted; transcripts live until the process exits.
#[derive(Default)]
pub struct InMemoryTranscriptStore {
    sessions: RwLock<HashMap<String, Vec<Message>>>,
}

#[injectable(TranscriptStore)]
impl InMemoryTranscriptStore {
    #[inject]
    pub fn create() -> InMemoryTranscriptStore {
        InMemoryTranscriptStore::default()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn append(&self, session_id: &str, message: Message) {
        let mut sessions = self.sessions.write().await;
        let transcript = sessions.entry(session_id.to_owned()).or_default();
        transcript.push(message);
        debug!(
            "session {session_id} transcript now has {} messages",
            transcript.len()
        );
    }

    async fn read(&self, session_id: &str) -> Vec<Message> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::entities::Role;

    #[tokio::test]
    async fn test_read_unknown_session_is_empty() {
        let store = InMemoryTranscriptStore::create();
        store.append("known", Message::user("hi")).await;

        assert!(store.read("unknown").await.is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_insertion_order() {
        let store = InMemoryTranscriptStore::create();
        store.append("s1", Message::user("first")).await;
        store.append("s1", Message::assistant("second")).await;
        store.append("s1", Message::user("third")).await;

        let transcript = store.read("s1").await;
        let contents: Vec<&str> = transcript.iter().map(|m| m.content.as_str()).collect();

        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(transcript[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryTranscriptStore::create();
        store.append("a", Message::user("for a")).await;
        store.append("b", Message::user("for b")).await;
        store.append("b", Message::assistant("also for b")).await;

        assert_eq!(store.read("a").await.len(), 1);
        assert_eq!(store.read("b").await.len(), 2);
    }

    #[tokio::test]
    async fn test_read_returns_snapshot() {
        let store = InMemoryTranscriptStore::create();
        store.append("s1", Message::user("hello")).await;

        let snapshot = store.read("s1").await;
        store.append("s1", Message::assistant("world")).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.read("s1").await.len(), 2);
    }
}
