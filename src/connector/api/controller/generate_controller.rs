use anyhow::Result;

use super::super::Container;

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Generate a quest and render it as pretty JSON.
    ///
    /// Generation failures surface as a [`crate::DomainError`] inside the
    /// returned error so the caller can render the `{ "error": .. }` record.
    pub async fn generate(&self, description: Option<String>, strict: bool) -> Result<String> {
        let use_case = self.container.generate_use_case(strict);
        let quest = use_case
            .execute(self.container.credential(), description.as_deref())
            .await?;

        Ok(serde_json::to_string_pretty(&quest)?)
    }
}
