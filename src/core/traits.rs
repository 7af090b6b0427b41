//! DI "Interfaces"

use crate::core::error::ChatError;
use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Records `message` in the session's transcript, asks the model for a reply and records the
    /// reply as well.
    ///
    /// Returns `Err` if the model could not produce a reply. The user message stays in the
    /// transcript in that case.
    async fn send_message(&self, session_id: &str, message: String) -> Result<String, ChatError>;

    /// Lists all messages of a session, oldest first. Unknown sessions have no messages.
    async fn history(&self, session_id: &str) -> Vec<entities::Message>;
}
