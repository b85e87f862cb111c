//! # vectordash Embeddings
//!
//! Client-side utilities for working with embeddings produced by an
//! external model:
//! - Vector norm and cosine similarity
//! - Similarity classification for display
//! - Text chunking before indexing
//!
//! Every function here is pure and synchronous. Nothing is logged and
//! nothing is retried; validation errors go straight back to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use vectordash_embeddings::{chunk, cosine_similarity, SimilarityBand};
//!
//! let score = cosine_similarity(&[0.2, 0.9, 0.1], &[0.25, 0.85, 0.05]).unwrap();
//! assert_eq!(SimilarityBand::from_score(score), SimilarityBand::NearDuplicate);
//!
//! let parts = chunk("abcdefghij", 4, 1).unwrap();
//! assert_eq!(parts.len(), 4);
//! ```

mod chunker;
mod embedding;
mod error;
mod normalize;
mod similarity;

pub use chunker::{
    chunk, split_by_pages, split_lines, whole_document, ChunkConfig, ChunkMethod, Chunker,
    Fragment,
};
pub use embedding::Embedding;
pub use error::{EmbeddingError, EmbeddingResult};
pub use normalize::{cosine_similarity, dot_product, norm};
pub use similarity::{
    compare_dimensions, sample_dimensions, DimensionPair, SimilarityBand, SimilarityReport,
    DEFAULT_CHART_DIMENSIONS,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{chunk, cosine_similarity, norm, split_by_pages, whole_document};
    pub use crate::{ChunkConfig, ChunkMethod, Chunker, Fragment};
    pub use crate::{Embedding, EmbeddingError, EmbeddingResult};
    pub use crate::{SimilarityBand, SimilarityReport};
}
