//! Layered error types

use proza_core::CoreError;
use thiserror::Error;

/// Engine-level errors (Application Layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core domain error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Markup could not be tokenised
    #[error("malformed markup at byte {position}: {reason}")]
    Markup {
        /// Byte offset reported by the XML reader
        position: u64,
        /// Reader error message
        reason: String,
    },

    /// Annotated input could not be read
    #[error("malformed annotation at line {line}: {reason}")]
    Annotation {
        /// One-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Embedded or external lexicon is invalid
    #[error("invalid lexicon: {0}")]
    Lexicon(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding error (UTF-8, gzip stream)
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_conversion() {
        let err: EngineError = CoreError::InvalidChunkSize.into();
        assert!(matches!(err, EngineError::Core(CoreError::InvalidChunkSize)));
        assert_eq!(
            err.to_string(),
            "core error: chunk size must be greater than zero"
        );
    }

    #[test]
    fn test_utf8_error_conversion() {
        let err: EngineError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, EngineError::Encoding(_)));
    }

    #[test]
    fn test_markup_error_display() {
        let err = EngineError::Markup {
            position: 12,
            reason: "unexpected end".to_string(),
        };
        assert_eq!(err.to_string(), "malformed markup at byte 12: unexpected end");
    }
}
