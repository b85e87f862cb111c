//! # vectordash
//!
//! Client-side companion to a vector embedding service: compare embeddings,
//! split documents for indexing and build the payloads the service expects.
//!
//! ## Quick Start
//!
//! ```rust
//! use vectordash::prelude::*;
//!
//! // Compare two embeddings
//! let report = SimilarityReport::compute(&[0.1, 0.8, 0.3], &[0.1, 0.7, 0.4]).unwrap();
//! println!("{}", report); // 98.73% (near-duplicate)
//!
//! // Split a document and turn the fragments into index records
//! let chunker = Chunker::fixed(1000, 100).unwrap();
//! let fragments = chunker.split("First section.\n\nSecond section.");
//! let source = DocumentSource::new("guide.txt", 31, "text/plain");
//! let request = IndexRequest::new(source.to_documents(&fragments, chunker.method()));
//! assert_eq!(request.documents.len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`embeddings`] - Vector math, similarity bands, chunking
//! - [`index`] - Index records, templates, service payloads, history

pub use vectordash_embeddings as embeddings;
pub use vectordash_index as index;

/// Prelude module for convenient imports.
///
/// ```rust
/// use vectordash::prelude::*;
/// ```
pub mod prelude {
    // Vector math and chunking
    pub use vectordash_embeddings::{
        chunk, compare_dimensions, cosine_similarity, dot_product, norm, sample_dimensions,
        split_by_pages, split_lines, whole_document,
    };
    pub use vectordash_embeddings::{
        ChunkConfig, ChunkMethod, Chunker, DimensionPair, Embedding, EmbeddingError,
        EmbeddingResult, Fragment, SimilarityBand, SimilarityReport, DEFAULT_CHART_DIMENSIONS,
    };

    // Index preparation
    pub use vectordash_index::{
        find_template, format_file_size, format_score, validate_collection_name,
    };
    pub use vectordash_index::{
        ChunkPreset, CollectionTemplate, DocumentSource, EmbedRequest, EmbedResponse,
        EmbeddingHistory, Endpoints, HistoryExport, IndexDocument, IndexError, IndexRequest,
        IndexResponse, IndexResult, JsonFileStore, KeyValueStore, ManualDocument, MemoryStore,
        SearchHit, SearchParams, SearchResponse, DEFAULT_API_BASE_URL, DEFAULT_HISTORY_LIMIT,
        MAX_FILE_BYTES, TEMPLATES,
    };
}
