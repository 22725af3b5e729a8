use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, GenerateController};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    chat_controller: ChatController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            chat_controller: ChatController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                description,
                strict,
            } => self.generate_controller.generate(description, strict).await,
            Commands::Chat { prompts, system } => {
                self.chat_controller.chat(prompts, system).await
            }
        }
    }
}
