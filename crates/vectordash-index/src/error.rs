//! Error types for index preparation and history persistence.

use thiserror::Error;
use vectordash_embeddings::EmbeddingError;

/// Errors raised while building index payloads or managing history.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("Invalid collection name '{0}': use letters, digits, '_' or '-'")]
    InvalidCollectionName(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Document text is empty")]
    EmptyDocument,

    #[error("File is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Index {index} out of range (history has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    #[error("Invalid service response: {0}")]
    InvalidResponse(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;
