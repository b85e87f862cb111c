//! Error types for vector math and chunking.

use thiserror::Error;

/// Validation errors raised by the embedding utilities.
///
/// Both variants are local and non-retryable: the caller has to fix the
/// input. No partial output is ever returned alongside one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Invalid chunking config: {0}")]
    InvalidConfig(String),
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;
