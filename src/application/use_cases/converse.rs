use std::sync::Arc;

use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{DomainError, Message, MessageMemory, Role};

/// Use case: a multi-turn chat whose history lives in an owned [`MessageMemory`].
pub struct ConverseUseCase {
    chat_client: Arc<dyn ChatClient>,
    memory: MessageMemory,
}

impl ConverseUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            memory: MessageMemory::new(),
        }
    }

    /// Seed the conversation with a system directive.
    pub fn with_system(mut self, directive: impl Into<String>) -> Self {
        self.memory.register_message(Message::system(directive));
        self
    }

    pub fn memory(&self) -> &MessageMemory {
        &self.memory
    }

    /// Record `text` as a user turn, send the whole history, and record the reply.
    ///
    /// On failure the user turn stays in the history and no reply is recorded;
    /// call [`Self::retry`] to resend it rather than `say`ing it again.
    pub async fn say(&mut self, credential: &str, text: &str) -> Result<Message, DomainError> {
        self.memory.register_message(Message::user(text));
        self.dispatch(credential).await
    }

    /// Resend the history after a failed turn, without adding a new message.
    ///
    /// Only valid while the last recorded message is an unanswered user turn.
    pub async fn retry(&mut self, credential: &str) -> Result<Message, DomainError> {
        if !self.has_pending_turn() {
            return Err(DomainError::runtime(
                "InvalidInput",
                "no unanswered user turn to resend",
            ));
        }

        self.dispatch(credential).await
    }

    /// True when the last recorded message is a user turn still awaiting a reply.
    pub fn has_pending_turn(&self) -> bool {
        self.memory.last().is_some_and(|m| m.role() == Role::User)
    }

    async fn dispatch(&mut self, credential: &str) -> Result<Message, DomainError> {
        let history = self.memory.get_messages();

        debug!("Sending conversation turn ({} messages)", history.len());

        let reply = self.chat_client.send(credential, history).await?;
        self.memory.register_message(reply.clone());

        Ok(reply)
    }
}
