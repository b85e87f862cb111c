//! Collection templates with chunking presets.

use serde::Serialize;
use vectordash_embeddings::{ChunkConfig, ChunkMethod};

/// Default chunking style of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkPreset {
    Paragraphs,
    Products,
    Sections,
}

impl ChunkPreset {
    pub fn config(&self) -> ChunkConfig {
        match self {
            ChunkPreset::Paragraphs => ChunkConfig::paragraphs(),
            ChunkPreset::Products => ChunkConfig::products(),
            ChunkPreset::Sections => ChunkConfig::sections(),
        }
    }
}

/// A starting point for a new collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub default_chunk: ChunkPreset,
}

impl CollectionTemplate {
    /// Every preset chunks with fixed-size windows.
    pub fn chunk_settings(&self) -> (ChunkMethod, ChunkConfig) {
        (ChunkMethod::Chunks, self.default_chunk.config())
    }
}

pub const TEMPLATES: &[CollectionTemplate] = &[
    CollectionTemplate {
        id: "knowledge_base",
        name: "Knowledge Base",
        description: "Support documentation, FAQs, and help articles",
        default_chunk: ChunkPreset::Paragraphs,
    },
    CollectionTemplate {
        id: "product_catalog",
        name: "Product Catalog",
        description: "Product descriptions, specifications, and features",
        default_chunk: ChunkPreset::Products,
    },
    CollectionTemplate {
        id: "legal_documents",
        name: "Legal Documents",
        description: "Contracts, policies, and regulatory content",
        default_chunk: ChunkPreset::Sections,
    },
    CollectionTemplate {
        id: "employee_handbook",
        name: "Employee Resources",
        description: "HR policies, procedures, and guidelines",
        default_chunk: ChunkPreset::Paragraphs,
    },
    CollectionTemplate {
        id: "research",
        name: "Research & Reports",
        description: "Market research, white papers, and analysis",
        default_chunk: ChunkPreset::Sections,
    },
    CollectionTemplate {
        id: "custom",
        name: "Custom Collection",
        description: "Create a custom database for your specific needs",
        default_chunk: ChunkPreset::Paragraphs,
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static CollectionTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_template() {
        let legal = find_template("legal_documents").unwrap();
        let (method, config) = legal.chunk_settings();
        assert_eq!(method, ChunkMethod::Chunks);
        assert_eq!((config.size, config.overlap), (3000, 300));

        let catalog = find_template("product_catalog").unwrap();
        assert_eq!(catalog.default_chunk.config().overlap, 50);

        assert!(find_template("unknown").is_none());
    }

    #[test]
    fn test_template_ids_are_unique() {
        for (i, t) in TEMPLATES.iter().enumerate() {
            assert!(TEMPLATES[i + 1..].iter().all(|other| other.id != t.id));
        }
    }
}
