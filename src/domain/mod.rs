//! # Domain Layer
//!
//! Conversation and quest models, the error taxonomy, and reply parsing.
//! This layer is independent of transport and runtime concerns.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
