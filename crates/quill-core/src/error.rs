//! Error types shared by the identifier codec, display names and doc overlay
//!
//! Lookups that simply find nothing are not errors; they return `None`.
//! These variants cover contract violations and malformed input only.

use thiserror::Error;

/// Errors raised by the Quill core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was empty or referred to nothing
    #[error("required argument '{0}' was not provided")]
    ArgumentRequired(&'static str),

    /// Identifier text could not be parsed
    #[error("malformed identifier '{text}': {reason}")]
    MalformedIdentifier { text: String, reason: String },

    /// A symbol kind reached a dispatch point that cannot handle it
    #[error("unsupported symbol kind: {0}")]
    UnsupportedSymbolKind(String),
}

impl Error {
    /// Create a malformed identifier error
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedIdentifier {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by bad identifier text
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedIdentifier { .. })
    }
}

/// Result type alias for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_required_names_parameter() {
        let err = Error::ArgumentRequired("symbol");
        assert!(err.to_string().contains("'symbol'"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_malformed_carries_text() {
        let err = Error::malformed("T:Foo{", "unbalanced '{'");
        assert!(err.is_malformed());
        assert!(err.to_string().contains("T:Foo{"));
        assert!(err.to_string().contains("unbalanced"));
    }

    #[test]
    fn test_unsupported_kind_display() {
        let err = Error::UnsupportedSymbolKind("!".to_string());
        assert_eq!(err.to_string(), "unsupported symbol kind: !");
    }
}
