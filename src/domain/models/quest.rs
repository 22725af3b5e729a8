use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::DomainError;

/// A single objective: something to defeat, acquire or find, with a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    name: String,
    amount: Number,
}

impl Objective {
    /// `amount` keeps the model's number as written: `2` stays an integer.
    pub fn new(name: impl Into<String>, amount: impl Into<Number>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &Number {
        &self.amount
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enemies: Option<Vec<Objective>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_items: Option<Vec<Objective>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_characters: Option<Vec<Objective>>,
}

impl QuestData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enemies(mut self, enemies: Vec<Objective>) -> Self {
        self.enemies = Some(enemies);
        self
    }

    pub fn with_target_items(mut self, items: Vec<Objective>) -> Self {
        self.target_items = Some(items);
        self
    }

    pub fn with_target_characters(mut self, characters: Vec<Objective>) -> Self {
        self.target_characters = Some(characters);
        self
    }

    pub fn enemies(&self) -> Option<&[Objective]> {
        self.enemies.as_deref()
    }

    pub fn target_items(&self) -> Option<&[Objective]> {
        self.target_items.as_deref()
    }

    pub fn target_characters(&self) -> Option<&[Objective]> {
        self.target_characters.as_deref()
    }

    pub fn objectives(&self) -> impl Iterator<Item = &Objective> {
        self.enemies
            .iter()
            .chain(self.target_items.iter())
            .chain(self.target_characters.iter())
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives().next().is_none()
    }
}

/// Structured quest as produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    description: String,
    data: QuestData,
}

impl Quest {
    pub fn new(description: impl Into<String>, data: QuestData) -> Self {
        Self {
            description: description.into(),
            data,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data(&self) -> &QuestData {
        &self.data
    }

    /// Check the semantic rules the JSON directive asks the model to follow.
    ///
    /// Reports the first violated rule as [`DomainError::Validation`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description is empty"));
        }

        if self.data.is_empty() {
            return Err(DomainError::validation(
                "data holds no enemies, target items or target characters",
            ));
        }

        if let Some(objective) = self.data.objectives().find(|o| o.name.trim().is_empty()) {
            return Err(DomainError::validation(format!(
                "objective with amount {} has an empty name",
                objective.amount
            )));
        }

        Ok(())
    }
}
