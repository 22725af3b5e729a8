use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::{ChatClient, ConverseUseCase, GenerateQuestUseCase, MockChatClient, OpenAiChatClient};

/// Credential handed to the mock client when none is configured.
const MOCK_CREDENTIAL: &str = "mock-token";

pub struct ContainerConfig {
    /// Bearer token; falls back to `CHATGPT_TOKEN`, then `OPENAI_API_KEY`.
    pub token: Option<String>,
    /// Answer from [`MockChatClient`] instead of calling the endpoint.
    pub mock: bool,
}

impl ContainerConfig {
    /// Resolve the credential from the explicit token or `lookup`ed variables.
    pub fn resolve_credential(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.token
            .clone()
            .or_else(|| lookup("CHATGPT_TOKEN"))
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|token| !token.trim().is_empty())
    }
}

/// Load `KEY=value` pairs into the process environment.
///
/// With an explicit `path` the file must exist. Without one, a `.env` in the
/// working directory is loaded if present. Variables already set win.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file {}", path.display())),
        None => match dotenvy::dotenv() {
            Ok(found) => {
                debug!("Loaded environment from {}", found.display());
                Ok(())
            }
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(e).context("failed to load .env"),
        },
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    credential: String,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let credential = config.resolve_credential(|key| std::env::var(key).ok());

        let (chat_client, credential): (Arc<dyn ChatClient>, String) = if config.mock {
            debug!("Using mock chat client");
            (
                Arc::new(MockChatClient::new()),
                credential.unwrap_or_else(|| MOCK_CREDENTIAL.to_string()),
            )
        } else {
            let Some(credential) = credential else {
                bail!("no API token: set CHATGPT_TOKEN or pass --token");
            };
            let client = OpenAiChatClient::from_env();
            debug!(
                "Using chat endpoint {} with model {}",
                client.endpoint(),
                client.model_name()
            );
            (Arc::new(client), credential)
        };

        Ok(Self::with_client(chat_client, credential))
    }

    /// Wire an explicit client, bypassing environment lookup.
    pub fn with_client(chat_client: Arc<dyn ChatClient>, credential: impl Into<String>) -> Self {
        Self {
            chat_client,
            credential: credential.into(),
        }
    }

    pub fn generate_use_case(&self, strict: bool) -> GenerateQuestUseCase {
        GenerateQuestUseCase::new(self.chat_client.clone()).with_strict_validation(strict)
    }

    pub fn converse_use_case(&self) -> ConverseUseCase {
        ConverseUseCase::new(self.chat_client.clone())
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn config(token: Option<&str>) -> ContainerConfig {
        ContainerConfig {
            token: token.map(str::to_string),
            mock: false,
        }
    }

    #[test]
    fn explicit_token_wins() {
        let env = HashMap::from([("CHATGPT_TOKEN", "from-env")]);
        let token = config(Some("from-flag"))
            .resolve_credential(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(token.as_deref(), Some("from-flag"));
    }

    #[test]
    fn falls_back_to_openai_api_key() {
        let env = HashMap::from([("OPENAI_API_KEY", "sk-openai")]);
        let token = config(None).resolve_credential(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(token.as_deref(), Some("sk-openai"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let token = config(Some("  ")).resolve_credential(|_| None);
        assert!(token.is_none());
    }

    #[test]
    fn loads_explicit_env_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "QUESTGEN_CONTAINER_TEST_VAR=loaded").expect("write");

        load_env_file(Some(file.path())).expect("load");
        assert_eq!(
            std::env::var("QUESTGEN_CONTAINER_TEST_VAR").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn missing_explicit_env_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_env_file(Some(&dir.path().join("absent.env"))).is_err());
    }

    #[test]
    fn mock_container_needs_no_token() {
        let container = Container::new(ContainerConfig {
            token: None,
            mock: true,
        })
        .expect("container");
        assert!(!container.credential().is_empty());
    }
}
