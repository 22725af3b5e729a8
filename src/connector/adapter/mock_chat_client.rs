use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{DomainError, Message};

/// Reply used once the scripted queue is exhausted.
const DEFAULT_REPLY: &str = "\
```json
{
  \"description\": \"Clear the old mill of the 4 giant rats nesting there, then bring the miller's lost key back to Hilda in the village.\",
  \"data\": {
    \"enemies\": [{ \"name\": \"Giant Rat\", \"amount\": 4 }],
    \"targetItems\": [{ \"name\": \"Miller's Key\", \"amount\": 1 }],
    \"targetCharacters\": [{ \"name\": \"Hilda\", \"amount\": 1 }]
  }
}
```";

/// Offline [`ChatClient`] that answers from a script and records every call.
///
/// Scripted outcomes are consumed in order; afterwards every call gets a
/// canned quest reply.
pub struct MockChatClient {
    script: Mutex<VecDeque<Result<Message, DomainError>>>,
    calls: Mutex<Vec<(String, Vec<Message>)>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue an assistant reply with `content`.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.push(Ok(Message::assistant(content)))
    }

    /// Queue a failure.
    pub fn with_error(self, error: DomainError) -> Self {
        self.push(Err(error))
    }

    fn push(self, outcome: Result<Message, DomainError>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
        self
    }

    /// Every `(credential, messages)` pair received so far, oldest first.
    pub fn calls(&self) -> Vec<(String, Vec<Message>)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn send(&self, credential: &str, messages: &[Message]) -> Result<Message, DomainError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((credential.to_string(), messages.to_vec()));

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        debug!(
            "MockChatClient: answering {} messages ({})",
            messages.len(),
            if scripted.is_some() { "scripted" } else { "default" }
        );

        scripted.unwrap_or_else(|| Ok(Message::assistant(DEFAULT_REPLY)))
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
