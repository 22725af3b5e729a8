//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion over HTTP (OpenAI-compatible endpoints)
//! - A scripted offline chat client
//! - The command-line container, router and controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
