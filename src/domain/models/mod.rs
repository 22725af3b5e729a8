mod message;
mod message_memory;
mod quest;

pub use message::*;
pub use message_memory::*;
pub use quest::*;
