//! Chat and history endpoints

use crate::api::chat::schemas::{ChatRequest, ChatResponse, Message};
use crate::api::{ExtractSession, new_session_id};
use crate::core::error::ChatError;
use crate::core::traits::ChatService;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use di::Ref;
use di_axum::Inject;
use log::warn;

pub fn router() -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
}

async fn chat(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(header_session): ExtractSession,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    match handle_chat(chat_service, header_session, request).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { response: reply })),
        Err(e) => {
            warn!("chat request failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse {
                    response: format!("Error: {e}"),
                }),
            )
        }
    }
}

async fn handle_chat(
    chat_service: Ref<dyn ChatService>,
    header_session: Option<String>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<String, ChatError> {
    let Json(request) = request?;
    let session_id = header_session
        .or(request.session_id)
        .unwrap_or_else(new_session_id);

    chat_service.send_message(&session_id, request.message).await
}

async fn history(
    Inject(chat_service): Inject<dyn ChatService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> (StatusCode, Json<Vec<Message>>) {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            warn!("ignoring unreadable history query: {e}");
            Vec::new()
        }
    };

    let messages = match session_from_query(&pairs) {
        Some(session_id) => chat_service.history(session_id).await,
        None => Vec::new(),
    };

    (
        StatusCode::OK,
        Json(messages.into_iter().map(Message::from).collect()),
    )
}

/// The first `sessionId` value of a query string; later repetitions are ignored.
fn session_from_query(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "sessionId")
        .map(|(_, value)| value.as_str())
}

pub mod schemas {
    use crate::infrastructure::entities;
    use serde::{Deserialize, Deserializer, Serialize};

    #[derive(Deserialize, Debug)]
    pub struct ChatRequest {
        pub message: String,
        /// Only consulted when the request has no `X-Session-ID` header. Values that are not
        /// strings are treated as absent.
        #[serde(default, rename = "sessionId", deserialize_with = "string_or_none")]
        pub session_id: Option<String>,
    }

    fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
    }

    #[derive(Serialize, Deserialize, Debug)]
    pub struct ChatResponse {
        pub response: String,
    }

    #[derive(Serialize, Debug, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        User,
        Assistant,
    }

    impl From<entities::Role> for Role {
        fn from(role: entities::Role) -> Self {
            match role {
                entities::Role::User => Role::User,
                entities::Role::Assistant => Role::Assistant,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct Message {
        pub role: Role,
        pub content: String,
        /// Seconds since the Unix epoch.
        pub timestamp: f64,
    }

    impl From<entities::Message> for Message {
        fn from(message: entities::Message) -> Self {
            Message {
                role: message.role.into(),
                content: message.content,
                timestamp: message.created_at.timestamp_micros() as f64 / 1_000_000.0,
            }
        }
    }
}
