use async_trait::async_trait;

use crate::domain::{DomainError, Message};

/// Sends a conversation to a chat-completion model and returns its reply.
///
/// Implementors own transport and wire-format details; the use cases only
/// see ordered [`Message`]s in and one assistant [`Message`] out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `messages` in order, authenticating with `credential` as a bearer
    /// token. Exactly one request is made; failures are never retried.
    async fn send(&self, credential: &str, messages: &[Message]) -> Result<Message, DomainError>;

    /// Model identifier requests are issued against.
    fn model_name(&self) -> &str;
}
