mod converse;
mod generate_quest;

pub use converse::*;
pub use generate_quest::*;
