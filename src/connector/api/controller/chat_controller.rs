use anyhow::{Context, Result};

use crate::{Message, Role};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run every prompt as one turn and render the transcript.
    ///
    /// When a turn fails the error keeps the underlying [`crate::DomainError`]
    /// and carries the transcript up to and including the failed prompt as its
    /// outermost context.
    pub async fn chat(&self, prompts: Vec<String>, system: Option<String>) -> Result<String> {
        let mut use_case = self.container.converse_use_case();
        if let Some(directive) = system {
            use_case = use_case.with_system(directive);
        }

        for prompt in &prompts {
            if let Err(e) = use_case.say(self.container.credential(), prompt).await {
                let partial = Self::format_transcript(use_case.memory().get_messages());
                return Err(e).context(partial);
            }
        }

        Ok(Self::format_transcript(use_case.memory().get_messages()))
    }

    fn format_transcript(messages: &[Message]) -> String {
        messages
            .iter()
            .filter(|m| m.role() != Role::System)
            .map(|m| format!("{}> {}", m.role(), m.content()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
