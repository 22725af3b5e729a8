use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{DomainError, Message};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
///
/// Implements [`ChatClient`]. Each [`ChatClient::send`] issues exactly one
/// `POST` and maps every outcome onto a [`Message`] or a [`DomainError`]:
///
/// - body carries an `error` field → [`DomainError::Remote`] with its text
/// - body carries `choices[0].message` → that message
/// - transport or decode failure → [`DomainError::Runtime`]
///
/// The HTTP status is only logged; the body decides the outcome. No timeout is
/// applied unless one is configured.
///
/// ```text
/// CHATGPT_ENDPOINT=https://api.openai.com/v1/chat/completions
/// CHATGPT_MODEL=gpt-3.5-turbo
/// CHATGPT_TIMEOUT_SECS=60
/// ```
pub struct OpenAiChatClient {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl OpenAiChatClient {
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    /// Construct from environment variables:
    ///
    /// | Variable               | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `CHATGPT_ENDPOINT`     | `https://api.openai.com/v1/chat/completions`  |
    /// | `CHATGPT_MODEL`        | `gpt-3.5-turbo`                               |
    /// | `CHATGPT_TIMEOUT_SECS` | unset (no timeout)                            |
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("CHATGPT_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model = std::env::var("CHATGPT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let client = Self::new(model, endpoint);

        match std::env::var("CHATGPT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a response body onto the reply message or an error.
    fn interpret_body(body: &str) -> Result<Message, DomainError> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| DomainError::runtime(DomainError::json_kind(&e), e.to_string()))?;

        if let Some(error) = json.get("error") {
            return Err(DomainError::remote(Self::remote_error_text(error)));
        }

        let message = json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| DomainError::runtime("Data", "response contains no completion choice"))?;

        Message::deserialize(message)
            .map_err(|e| DomainError::runtime(DomainError::json_kind(&e), e.to_string()))
    }

    /// OpenAI nests the text under `error.message`; plain strings are used as-is.
    fn remote_error_text(error: &Value) -> String {
        match error {
            Value::String(text) => text.clone(),
            Value::Object(fields) => fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        }
    }

    fn transport_kind(err: &reqwest::Error) -> &'static str {
        if err.is_timeout() {
            "Timeout"
        } else if err.is_connect() {
            "Connect"
        } else if err.is_builder() {
            "Builder"
        } else if err.is_redirect() {
            "Redirect"
        } else if err.is_body() {
            "Body"
        } else if err.is_decode() {
            "Decode"
        } else if err.is_request() {
            "Request"
        } else {
            "Http"
        }
    }

    fn transport_error(err: reqwest::Error) -> DomainError {
        DomainError::runtime(Self::transport_kind(&err), err.to_string())
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn send(&self, credential: &str, messages: &[Message]) -> Result<Message, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::runtime(
                "InvalidInput",
                "at least one message is required",
            ));
        }

        let request = ApiRequest {
            model: &self.model,
            messages,
        };

        debug!(
            "OpenAiChatClient: POST {} ({} messages, model {})",
            self.endpoint,
            messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        debug!("OpenAiChatClient: endpoint returned {status}");

        Self::interpret_body(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
