//! Pure domain logic shared by the use cases.

mod fenced_json;

pub use fenced_json::*;
