//! Embedding records.

use crate::normalize::norm;
use crate::{EmbeddingResult, SimilarityReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An embedding together with the text it was produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Source text.
    pub text: String,
    /// The vector representation.
    #[serde(rename = "embedding")]
    pub vector: Vec<f32>,
    /// When the embedding was created.
    pub created: DateTime<Utc>,
    /// Vector length.
    pub dimensions: usize,
    /// Euclidean norm of the vector.
    pub norm: f32,
}

impl Embedding {
    /// Create a new embedding stamped with the current time.
    pub fn new(text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self::created_at(text, vector, Utc::now())
    }

    /// Create with an explicit creation time.
    pub fn created_at(text: impl Into<String>, vector: Vec<f32>, created: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            dimensions: vector.len(),
            norm: norm(&vector),
            vector,
            created,
        }
    }

    /// Get dimension.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Compare with another embedding.
    pub fn compare(&self, other: &Embedding) -> EmbeddingResult<SimilarityReport> {
        SimilarityReport::compute(&self.vector, &other.vector)
    }

    /// Leading characters of the text, for listings.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }
}
