use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Every failure the chat client and the quest generator can report.
///
/// The `Display` text of each variant is the exact user-facing error message,
/// and serialising a value yields the `{ "error": "<text>" }` record callers
/// receive in place of a successful result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The endpoint answered with an `error` payload. The text is passed
    /// through untouched.
    #[error("{0}")]
    Remote(String),

    #[error("Runtime error ({kind}): {message}")]
    Runtime { kind: String, message: String },

    #[error("Model Error: Could not parse JSON")]
    Extraction,

    #[error("Model Error ({kind}): {message}")]
    Decode { kind: String, message: String },

    #[error("Model Error (Validation): {0}")]
    Validation(String),
}

impl DomainError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn runtime(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Runtime {
            kind: kind.into(),
            message: msg.into(),
        }
    }

    pub fn decode(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            kind: kind.into(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify a `serde_json` failure the way it is reported in error text.
    pub fn json_kind(err: &serde_json::Error) -> &'static str {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => "Io",
            Category::Syntax => "Syntax",
            Category::Data => "Data",
            Category::Eof => "Eof",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime { .. })
    }

    /// True for failures caused by the content of the model's reply rather
    /// than by the transport or the endpoint.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::Extraction | Self::Decode { .. } | Self::Validation(_)
        )
    }
}

impl Serialize for DomainError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("DomainError", 1)?;
        record.serialize_field("error", &self.to_string())?;
        record.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_pass_text_through() {
        let err = DomainError::remote("rate limited");
        assert_eq!(err.to_string(), "rate limited");
        assert!(err.is_remote());
        assert!(!err.is_runtime());
        assert!(!DomainError::Extraction.is_remote());
    }

    #[test]
    fn runtime_errors_name_their_kind() {
        let err = DomainError::runtime("Connect", "connection refused");
        assert_eq!(
            err.to_string(),
            "Runtime error (Connect): connection refused"
        );
        assert!(err.is_runtime());
        assert!(!err.is_model_error());
    }

    #[test]
    fn model_errors_share_a_prefix() {
        assert_eq!(
            DomainError::Extraction.to_string(),
            "Model Error: Could not parse JSON"
        );
        assert!(DomainError::decode("Syntax", "expected value")
            .to_string()
            .starts_with("Model Error ("));
        assert!(DomainError::validation("empty data")
            .to_string()
            .starts_with("Model Error ("));
    }

    #[test]
    fn serializes_as_error_record() {
        let json = serde_json::to_value(DomainError::remote("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn json_kind_distinguishes_syntax_from_eof() {
        let syntax = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        assert_eq!(DomainError::json_kind(&syntax), "Syntax");

        let eof = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(DomainError::json_kind(&eof), "Eof");
    }
}
