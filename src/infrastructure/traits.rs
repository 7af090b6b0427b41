//! Infrastructure traits, used for DI on higher levels

use crate::core::error::ModelError;
use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Appends a message to the end of the session's transcript, creating the session if needed.
    async fn append(&self, session_id: &str, message: entities::Message);

    /// Returns a snapshot of the session's transcript in insertion order.
    ///
    /// Unknown sessions yield an empty transcript.
    async fn read(&self, session_id: &str) -> Vec<entities::Message>;
}

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generates a single, complete reply for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError>;
}
