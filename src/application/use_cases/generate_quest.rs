use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{extract_fenced_json, DomainError, Message, Quest};

/// Describes the JSON shape the model must answer with.
const JSON_DIRECTIVE: &str = "\
Generate a JSON based on a text with the following fields:
  - description: The provided text without any change. (Required!)
  - data: An object (Required! Also, it should not be an empty object)
  - data.enemies: An array of objects, each object must have a name (type string) and a amount (type number) field, that describe the enemies present in the text. (Optional, only if enemies present in the text)
  - data.targetItems: An array of objects, each object must have a name (type string) and a amount (type number) field, that describe an item to be acquired, as described in the text. (Optional, only if an item is to be acquired)
  - data.targetCharacters: An array of objects, each object must have a name (type string) and a amount (type number) field, that describe a character to be found, as described in the text. (Optional, only if a character is to be found)

  Your response must only contain the json and nothing else.";

/// Used when the caller supplies no description: the model invents the quest.
const INVENT_QUEST_DIRECTIVE: &str = "\
Generate a quest using no more than 50 words, and must be written in as if directed to the character. This quest may contain a combination of the following elements (optional):
  - Enemies to be defeated
  - Items to be acquired
  - Characters to be found

  Use the generated quest as a base to generate the JSON.
  Only the JSON must be present in the response, and it must be formatted as markdown.";

const USER_TRIGGER: &str = "Generate.";

/// Use case: turn an optional free-text description into a structured [`Quest`].
pub struct GenerateQuestUseCase {
    chat_client: Arc<dyn ChatClient>,
    strict: bool,
}

impl GenerateQuestUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            strict: false,
        }
    }

    /// Reject decoded quests that break the directive's semantic rules
    /// (see [`Quest::validate`]). Off by default.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Build the two-message prompt sent for one generation.
    ///
    /// An empty description is treated as no description.
    pub fn build_prompt(description: Option<&str>) -> Vec<Message> {
        let quest_directive = match description.filter(|d| !d.is_empty()) {
            Some(text) => {
                format!("Generate the JSON based on the following quest description: {text}")
            }
            None => INVENT_QUEST_DIRECTIVE.to_string(),
        };

        vec![
            Message::system(format!("{JSON_DIRECTIVE}\n\n{quest_directive}")),
            Message::user(USER_TRIGGER),
        ]
    }

    /// Decode the first fenced JSON block of a model reply into a [`Quest`].
    pub fn parse_reply(&self, content: &str) -> Result<Quest, DomainError> {
        let Some(json) = extract_fenced_json(content) else {
            warn!("GenerateQuestUseCase: no fenced JSON block in model reply");
            return Err(DomainError::Extraction);
        };

        let quest: Quest = serde_json::from_str(json).map_err(|e| {
            warn!("GenerateQuestUseCase: fenced block is not a quest: {e}");
            DomainError::decode(DomainError::json_kind(&e), e.to_string())
        })?;

        if self.strict {
            quest.validate()?;
        }

        Ok(quest)
    }

    pub async fn execute(
        &self,
        credential: &str,
        description: Option<&str>,
    ) -> Result<Quest, DomainError> {
        let prompt = Self::build_prompt(description);

        debug!(
            "Requesting quest from {} ({} description, {})",
            self.chat_client.model_name(),
            if description.is_some_and(|d| !d.is_empty()) {
                "with"
            } else {
                "without"
            },
            if self.is_strict() { "strict" } else { "lenient" }
        );

        // Client errors are returned as-is, never re-wrapped.
        let reply = self.chat_client.send(credential, &prompt).await?;

        debug!("Model reply: {}", reply.content());

        self.parse_reply(reply.content())
    }
}
