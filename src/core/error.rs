//! Chat error types.

use axum::extract::rejection::JsonRejection;
use thiserror::Error;

/// Failures of the model-generation service.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request never reached the model service, or no reply came back.
    #[error("{0}")]
    Unavailable(String),

    #[error("model request timed out")]
    Timeout,

    /// The model service answered with an error status.
    #[error("{message} (status code: {status})")]
    Rejected { status: u16, message: String },

    #[error("failed to decode model response: {0}")]
    InvalidResponse(String),
}

/// Everything that can go wrong while handling a chat message.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<JsonRejection> for ChatError {
    fn from(rejection: JsonRejection) -> Self {
        ChatError::InvalidRequest(rejection.body_text())
    }
}
