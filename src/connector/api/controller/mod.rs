pub mod chat_controller;
pub mod generate_controller;

pub use chat_controller::ChatController;
pub use generate_controller::GenerateController;
