//! Core error types (deterministic only)

use core::fmt;

/// Core domain errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Chunk size must be at least one token
    InvalidChunkSize,
    /// Chunk rows need a document identifier
    EmptyDocumentId,
    /// Node index does not belong to the document
    UnknownNode(usize),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidChunkSize => write!(f, "chunk size must be greater than zero"),
            CoreError::EmptyDocumentId => write!(f, "document id must not be empty"),
            CoreError::UnknownNode(index) => write!(f, "unknown node index {index}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
