//! Payloads exchanged with the embedding service.
//!
//! Only the shapes live here. Sending them is up to the caller's HTTP
//! client.

use crate::documents::{validate_collection_name, IndexDocument};
use crate::{IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vectordash_embeddings::{split_lines, Embedding};

/// Service used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://embeddings100.cloud-stacks.com";

/// Endpoint URLs derived from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn embed(&self) -> String {
        format!("{}/embed", self.base_url)
    }

    /// Index endpoint for a collection. The name is validated first.
    pub fn index(&self, collection: &str) -> IndexResult<String> {
        validate_collection_name(collection)?;
        Ok(format!("{}/index/{}", self.base_url, collection))
    }

    pub fn search(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn status(&self) -> String {
        format!("{}/status", self.base_url)
    }
}

/// Body of an embed call: a JSON array of texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbedRequest(pub Vec<String>);

impl EmbedRequest {
    /// One text, trimmed. Blank input yields an empty request.
    pub fn single(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self(Vec::new())
        } else {
            Self(vec![text.to_string()])
        }
    }

    /// One text per non-blank line.
    pub fn lines(text: &str) -> Self {
        Self(split_lines(text))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.0
    }
}

/// Reply to an embed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub dimensions: usize,
    #[serde(default)]
    pub processing_time_ms: f64,
}

impl EmbedResponse {
    /// Pair each returned vector with the text it was requested for.
    pub fn into_embeddings(self, request: &EmbedRequest) -> IndexResult<Vec<Embedding>> {
        if self.embeddings.len() != request.0.len() {
            return Err(IndexError::InvalidResponse(format!(
                "requested {} embeddings, received {}",
                request.0.len(),
                self.embeddings.len()
            )));
        }
        Ok(request
            .0
            .iter()
            .zip(self.embeddings)
            .map(|(text, vector)| Embedding::new(text.as_str(), vector))
            .collect())
    }
}

/// Body of an index call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub documents: Vec<IndexDocument>,
    /// HNSW graph degree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ef_construction: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tune_parameters: Option<bool>,
}

impl IndexRequest {
    pub fn new(documents: Vec<IndexDocument>) -> Self {
        Self {
            documents,
            m: None,
            ef_construction: None,
            tune_parameters: None,
        }
    }

    /// Set HNSW parameters. Zero leaves a parameter to the service.
    pub fn with_hnsw(mut self, m: u32, ef_construction: u32) -> Self {
        self.m = (m > 0).then_some(m);
        self.ef_construction = (ef_construction > 0).then_some(ef_construction);
        self
    }

    /// Ask the service to tune parameters. Omitted from the body when off.
    pub fn with_tuning(mut self, tune: bool) -> Self {
        self.tune_parameters = tune.then_some(true);
        self
    }
}

/// Reply to an index call. Anything without an `error` field is a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndexResponse {
    pub fn into_result(self) -> IndexResult<Map<String, Value>> {
        match self.error {
            Some(error) => Err(IndexError::InvalidResponse(error)),
            None => Ok(self.extra),
        }
    }
}

/// Body of a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub collection_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_vector: Option<Vec<f32>>,
    pub limit: usize,
    pub use_native_search: bool,
    pub score_all_documents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ef_param: Option<u32>,
}

impl SearchParams {
    /// Search by text.
    pub fn text(collection: &str, query: &str, limit: usize) -> IndexResult<Self> {
        Self::build(collection, Some(query.to_string()), None, limit)
    }

    /// Search by an embedding.
    pub fn vector(collection: &str, vector: Vec<f32>, limit: usize) -> IndexResult<Self> {
        Self::build(collection, None, Some(vector), limit)
    }

    fn build(
        collection: &str,
        query_text: Option<String>,
        query_vector: Option<Vec<f32>>,
        limit: usize,
    ) -> IndexResult<Self> {
        validate_collection_name(collection)?;
        Ok(Self {
            collection_name: collection.to_string(),
            query_text,
            query_vector,
            limit,
            use_native_search: false,
            score_all_documents: false,
            ef_param: None,
        })
    }

    /// Use the service's native ANN search with the given `ef`.
    pub fn with_native_search(mut self, ef: u32) -> Self {
        self.use_native_search = true;
        self.ef_param = Some(ef);
        self
    }

    pub fn with_score_all(mut self, score_all: bool) -> Self {
        self.score_all_documents = score_all;
        self
    }
}

/// One raw result from a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: Value,
    pub score: f32,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Reply to a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
    #[serde(default)]
    pub metric_used: String,
    #[serde(default)]
    pub search_time_ms: f64,
    #[serde(default)]
    pub total_found: usize,
    #[serde(default)]
    pub embedding_time_ms: f64,
}

/// A search result ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    pub score: f32,
    pub metadata: Map<String, Value>,
}

impl SearchHit {
    /// Score as a percentage with one decimal, e.g. `87.5%`.
    pub fn score_label(&self) -> String {
        format_score(self.score)
    }
}

impl SearchResponse {
    /// Flatten results: payload `text` becomes the hit text, every other
    /// payload field becomes metadata.
    pub fn hits(&self) -> Vec<SearchHit> {
        self.results
            .iter()
            .map(|item| {
                let mut metadata = item.payload.clone();
                let text = match metadata.remove("text") {
                    Some(Value::String(text)) => text,
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                let id = match &item.id {
                    Value::String(id) => id.clone(),
                    other => other.to_string(),
                };
                SearchHit {
                    id,
                    text,
                    score: item.score,
                    metadata,
                }
            })
            .collect()
    }
}

/// Format a similarity score as a percentage with one decimal.
pub fn format_score(score: f32) -> String {
    format!("{:.1}%", score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoints() {
        let endpoints = Endpoints::new("http://localhost:8000/");
        assert_eq!(endpoints.embed(), "http://localhost:8000/embed");
        assert_eq!(endpoints.search(), "http://localhost:8000/search");
        assert_eq!(endpoints.status(), "http://localhost:8000/status");
        assert_eq!(
            endpoints.index("my_knowledge_base").unwrap(),
            "http://localhost:8000/index/my_knowledge_base"
        );
        assert!(endpoints.index("bad/name").is_err());
    }

    #[test]
    fn test_embed_request_modes() {
        assert_eq!(EmbedRequest::single("  hello  ").texts(), ["hello"]);
        assert!(EmbedRequest::single("   ").is_empty());
        assert_eq!(EmbedRequest::lines("a\n\nb\n").texts(), ["a", "b"]);
        assert_eq!(serde_json::to_value(EmbedRequest::lines("a\nb")).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_embed_response_pairs_texts() {
        let request = EmbedRequest::lines("first\nsecond");
        let response: EmbedResponse = serde_json::from_value(json!({
            "embeddings": [[3.0, 4.0], [1.0, 0.0]],
            "model_used": "sentence-transformer-384",
            "dimensions": 2,
            "processing_time_ms": 12.5
        }))
        .unwrap();

        let embeddings = response.clone().into_embeddings(&request).unwrap();
        assert_eq!(embeddings[0].text, "first");
        assert!((embeddings[0].norm - 5.0).abs() < 1e-6);

        let short = EmbedRequest::single("only one");
        assert!(matches!(
            response.into_embeddings(&short),
            Err(IndexError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_index_request_omits_unset_parameters() {
        let request = IndexRequest::new(Vec::new()).with_hnsw(16, 0).with_tuning(false);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "documents": [], "m": 16 }));

        let tuned = IndexRequest::new(Vec::new()).with_hnsw(16, 200).with_tuning(true);
        let body = serde_json::to_value(&tuned).unwrap();
        assert_eq!(body["ef_construction"], 200);
        assert_eq!(body["tune_parameters"], true);
    }

    #[test]
    fn test_index_response() {
        let ok: IndexResponse = serde_json::from_value(json!({ "indexed": 3 })).unwrap();
        assert_eq!(ok.into_result().unwrap()["indexed"], 3);

        let failed: IndexResponse =
            serde_json::from_value(json!({ "error": "collection locked" })).unwrap();
        assert!(matches!(failed.into_result(), Err(IndexError::InvalidResponse(msg)) if msg == "collection locked"));
    }

    #[test]
    fn test_search_params() {
        let params = SearchParams::text("kb", "reset password", 5)
            .unwrap()
            .with_native_search(64);
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["query_text"], "reset password");
        assert_eq!(body["ef_param"], 64);
        assert!(body.get("query_vector").is_none());

        let by_vector = SearchParams::vector("kb", vec![0.1, 0.2], 3).unwrap();
        let body = serde_json::to_value(&by_vector).unwrap();
        assert!(body.get("query_text").is_none());
        assert!(body.get("ef_param").is_none());
        assert_eq!(body["use_native_search"], false);
    }

    #[test]
    fn test_search_hits() {
        let response: SearchResponse = serde_json::from_value(json!({
            "results": [
                { "id": 7, "score": 0.875, "payload": { "text": "Reset via email", "source": "faq.txt", "chunk_index": 0 } },
                { "id": "doc_2", "score": 0.5, "payload": {} }
            ],
            "metric_used": "cosine",
            "search_time_ms": 3.2,
            "total_found": 2,
            "embedding_time_ms": 8.0
        }))
        .unwrap();

        let hits = response.hits();
        assert_eq!(hits[0].id, "7");
        assert_eq!(hits[0].text, "Reset via email");
        assert_eq!(hits[0].metadata["source"], "faq.txt");
        assert!(hits[0].metadata.get("text").is_none());
        assert_eq!(hits[0].score_label(), "87.5%");
        assert_eq!(hits[1].id, "doc_2");
        assert_eq!(hits[1].text, "");
    }
}
