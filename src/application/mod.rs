//! # Application Layer
//!
//! Use cases and the ports they drive.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
