//! Index records built from fragments or typed-in documents.

use crate::{IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;
use vectordash_embeddings::ChunkMethod;

/// Largest file accepted for indexing (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Category used when an uploaded file has none.
pub const DEFAULT_CATEGORY: &str = "uploaded_document";

/// One record sent to the index endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id: String,
    pub text: String,
    pub metadata: Map<String, Value>,
}

/// A document typed in by hand rather than read from a file.
#[derive(Debug, Clone, Default)]
pub struct ManualDocument<'a> {
    /// Explicit id; defaults to `doc_{unix millis}`.
    pub id: Option<&'a str>,
    pub text: &'a str,
    pub source: &'a str,
    pub category: &'a str,
    /// Extra metadata as a JSON object. Blank means none.
    pub extra_metadata: &'a str,
}

impl IndexDocument {
    /// Build a record from a hand-written document.
    ///
    /// `source` and `category` always win over same-named keys in the extra
    /// metadata.
    pub fn manual(doc: ManualDocument<'_>) -> IndexResult<Self> {
        if doc.text.trim().is_empty() {
            return Err(IndexError::EmptyDocument);
        }

        let mut metadata = if doc.extra_metadata.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(doc.extra_metadata) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(IndexError::InvalidMetadata(
                        "expected a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(IndexError::InvalidMetadata(e.to_string())),
            }
        };
        metadata.insert("source".to_string(), Value::from(doc.source));
        metadata.insert("category".to_string(), Value::from(doc.category));

        let id = match doc.id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => format!("doc_{}", chrono::Utc::now().timestamp_millis()),
        };

        Ok(Self {
            id,
            text: doc.text.to_string(),
            metadata,
        })
    }
}

/// Where a set of fragments came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    /// File name, extension included.
    pub name: String,
    pub size_bytes: u64,
    /// MIME type, e.g. `text/plain`.
    pub file_type: String,
    pub category: Option<String>,
}

impl DocumentSource {
    pub fn new(name: impl Into<String>, size_bytes: u64, file_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            file_type: file_type.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Reject files above [`MAX_FILE_BYTES`].
    pub fn check_size(&self) -> IndexResult<()> {
        if self.size_bytes > MAX_FILE_BYTES {
            return Err(IndexError::FileTooLarge {
                size: self.size_bytes,
                limit: MAX_FILE_BYTES,
            });
        }
        Ok(())
    }

    /// File name without its last extension; used as the record id prefix.
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Turn fragments into index records `{stem}_{index}`.
    pub fn to_documents(&self, fragments: &[String], method: ChunkMethod) -> Vec<IndexDocument> {
        let total = fragments.len();
        let size = format_file_size(self.size_bytes);

        let documents: Vec<IndexDocument> = fragments
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let mut metadata = Map::new();
                metadata.insert("source".into(), Value::from(self.name.as_str()));
                metadata.insert("category".into(), Value::from(self.category()));
                metadata.insert("chunk_index".into(), Value::from(index));
                metadata.insert("total_chunks".into(), Value::from(total));
                metadata.insert("file_size".into(), Value::from(size.as_str()));
                metadata.insert("file_type".into(), Value::from(self.file_type.as_str()));
                metadata.insert("processing_method".into(), Value::from(method.as_str()));

                IndexDocument {
                    id: format!("{}_{}", self.stem(), index),
                    text: text.clone(),
                    metadata,
                }
            })
            .collect();

        debug!(source = %self.name, fragments = total, method = %method, "index records built");
        documents
    }
}

/// Human-readable size: megabytes from 1 MiB up, kilobytes below.
pub fn format_file_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1.0 {
        format!("{:.2} MB", mb)
    } else {
        format!("{:.2} KB", kb)
    }
}

/// Collection names may only contain ASCII letters, digits, `_` and `-`.
pub fn validate_collection_name(name: &str) -> IndexResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(IndexError::InvalidCollectionName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_records() {
        let source = DocumentSource::new("handbook.v2.txt", 2048, "text/plain");
        let fragments = vec!["first".to_string(), "second".to_string()];
        let docs = source.to_documents(&fragments, ChunkMethod::Chunks);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "handbook.v2_0");
        assert_eq!(docs[1].id, "handbook.v2_1");
        assert_eq!(docs[1].text, "second");

        let meta = &docs[1].metadata;
        assert_eq!(meta["chunk_index"], 1);
        assert_eq!(meta["total_chunks"], 2);
        assert_eq!(meta["category"], DEFAULT_CATEGORY);
        assert_eq!(meta["file_size"], "2.00 KB");
        assert_eq!(meta["processing_method"], "chunks");
    }

    #[test]
    fn test_category_override() {
        let source = DocumentSource::new("a.txt", 1, "text/plain").with_category("legal");
        let docs = source.to_documents(&["x".to_string()], ChunkMethod::Whole);
        assert_eq!(docs[0].metadata["category"], "legal");

        let blank = DocumentSource::new("a.txt", 1, "text/plain").with_category("  ");
        assert_eq!(blank.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_size_limit() {
        assert!(DocumentSource::new("a.pdf", MAX_FILE_BYTES, "application/pdf")
            .check_size()
            .is_ok());
        assert!(matches!(
            DocumentSource::new("a.pdf", MAX_FILE_BYTES + 1, "application/pdf").check_size(),
            Err(IndexError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "0.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }

    #[test]
    fn test_manual_document() {
        let doc = IndexDocument::manual(ManualDocument {
            id: Some("faq-1"),
            text: "Reset your password from the login page.",
            source: "faq",
            category: "support",
            extra_metadata: r#"{"lang": "en", "source": "ignored"}"#,
        })
        .unwrap();

        assert_eq!(doc.id, "faq-1");
        assert_eq!(doc.metadata["lang"], "en");
        assert_eq!(doc.metadata["source"], "faq");
        assert_eq!(doc.metadata["category"], "support");
    }

    #[test]
    fn test_manual_document_defaults_and_errors() {
        let doc = IndexDocument::manual(ManualDocument {
            text: "body",
            ..Default::default()
        })
        .unwrap();
        assert!(doc.id.starts_with("doc_"));

        let empty = IndexDocument::manual(ManualDocument {
            text: "   ",
            ..Default::default()
        });
        assert!(matches!(empty, Err(IndexError::EmptyDocument)));

        let bad = IndexDocument::manual(ManualDocument {
            text: "body",
            extra_metadata: "[1, 2]",
            ..Default::default()
        });
        assert!(matches!(bad, Err(IndexError::InvalidMetadata(_))));
    }

    #[test]
    fn test_collection_names() {
        assert!(validate_collection_name("my_knowledge_base").is_ok());
        assert!(validate_collection_name("docs-2024").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("../etc").is_err());
        assert!(validate_collection_name("with space").is_err());
    }
}
