pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatClient, ConverseUseCase, GenerateQuestUseCase};

pub use cli::Commands;

pub use connector::{
    load_env_file, Container, ContainerConfig, MockChatClient, OpenAiChatClient, Router,
    DEFAULT_ENDPOINT, DEFAULT_MODEL,
};

pub use domain::{
    extract_fenced_json, DomainError, Message, MessageMemory, Objective, Quest, QuestData, Role,
};
