//! Ollama model client
//!
//! Talks to a locally running Ollama server through its non-streaming `/api/generate` endpoint.

use crate::core::error::ModelError;
use crate::infrastructure::settings::Settings;
use crate::infrastructure::traits::ModelClient;
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OllamaClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[injectable(ModelClient)]
impl OllamaClient {
    #[inject]
    pub fn create(settings: Ref<Settings>) -> OllamaClient {
        OllamaClient::new(&settings.ollama_url, settings.request_timeout)
            .expect("failed to build Ollama HTTP client")
    }
}

impl OllamaClient {
    /// Fails if the HTTP client cannot be built, e.g. when no TLS backend is available.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<OllamaClient, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(OllamaClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(
            "Ollama request: url={url} model={model} prompt_length={}",
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!("Ollama response: status={status} body_length={}", body.len());

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(error_response) => error_response.error,
                Err(_) => String::from_utf8_lossy(&body).into_owned(),
            };
            error!("Ollama error response: status={status} message={message}");
            return Err(ModelError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<GenerateResponse>(&body)
            .map(|generated| generated.response)
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else {
        ModelError::Unavailable(e.to_string())
    }
}
