//! # vectordash Index
//!
//! Everything between a document and the embedding service's index,
//! except the HTTP call itself:
//! - Fragment → `{id, text, metadata}` records
//! - Collection templates with chunking presets
//! - Embed, index and search payloads
//! - A bounded embedding history behind a pluggable key/value store
//!
//! ## Usage
//!
//! ```rust
//! use vectordash_index::{DocumentSource, IndexRequest};
//! use vectordash_embeddings::{Chunker, ChunkMethod};
//!
//! let chunker = Chunker::fixed(1000, 100).unwrap();
//! let source = DocumentSource::new("handbook.txt", 4096, "text/plain");
//! let fragments = chunker.split("Vacation policy...\n\nRemote work policy...");
//!
//! let request = IndexRequest::new(source.to_documents(&fragments, ChunkMethod::Chunks))
//!     .with_hnsw(16, 200);
//! assert_eq!(request.documents[0].id, "handbook_0");
//! ```

pub mod documents;
mod error;
pub mod history;
pub mod store;
pub mod templates;
pub mod wire;

pub use documents::{
    format_file_size, validate_collection_name, DocumentSource, IndexDocument, ManualDocument,
    MAX_FILE_BYTES,
};
pub use error::{IndexError, IndexResult};
pub use history::{EmbeddingHistory, HistoryExport, DEFAULT_HISTORY_LIMIT};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use templates::{find_template, ChunkPreset, CollectionTemplate, TEMPLATES};
pub use wire::{
    format_score, EmbedRequest, EmbedResponse, Endpoints, IndexRequest, IndexResponse,
    SearchHit, SearchParams, SearchResponse, DEFAULT_API_BASE_URL,
};
