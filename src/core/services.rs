//! Implementations for the service the app needs.
//!

use crate::core::error::ChatError;
use crate::core::traits::ChatService;
use crate::infrastructure::entities::Message;
use crate::infrastructure::settings::Settings;
use crate::infrastructure::traits::{ModelClient, TranscriptStore};
use async_trait::async_trait;
use di::{Ref, injectable};
use log::info;

#[injectable(ChatService)]
pub struct MyChatService {
    store: Ref<dyn TranscriptStore>,
    model: Ref<dyn ModelClient>,
    settings: Ref<Settings>,
}

#[async_trait]
impl ChatService for MyChatService {
    async fn send_message(&self, session_id: &str, message: String) -> Result<String, ChatError> {
        // The prompt is the message alone; earlier turns are never replayed to the model.
        let prompt = message.clone();
        self.store.append(session_id, Message::user(message)).await;

        let reply = self.model.generate(&self.settings.model, &prompt).await?;
        info!(
            "session {session_id}: {} generated {} characters",
            self.settings.model,
            reply.chars().count()
        );

        self.store
            .append(session_id, Message::assistant(reply.clone()))
            .await;

        Ok(reply)
    }

    async fn history(&self, session_id: &str) -> Vec<Message> {
        self.store.read(session_id).await
    }
}
