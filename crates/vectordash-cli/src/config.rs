//! Configuration management for the vectordash CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vectordash::prelude::*;

/// Name of the project config file.
pub const CONFIG_FILE: &str = "vectordash.toml";

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "VECTORDASH_API_BASE_URL";

/// vectordash project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default)]
    pub method: ChunkMethod,
    #[serde(default = "default_chunk_size")]
    pub size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub overlap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_m")]
    pub m: u32,
    #[serde(default = "default_ef_construction")]
    pub ef_construction: u32,
    #[serde(default)]
    pub tune_parameters: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
    #[serde(default = "default_model")]
    pub model: String,
}

// Default value functions
fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_chunk_size() -> usize { ChunkConfig::default().size }
fn default_chunk_overlap() -> usize { ChunkConfig::default().overlap }
fn default_collection() -> String { "my_knowledge_base".to_string() }
fn default_category() -> String { "uploaded_document".to_string() }
fn default_m() -> u32 { 16 }
fn default_ef_construction() -> u32 { 200 }
fn default_history_limit() -> usize { DEFAULT_HISTORY_LIMIT }
fn default_model() -> String { "sentence-transformer-384".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            method: ChunkMethod::default(),
            size: default_chunk_size(),
            overlap: default_chunk_overlap(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            category: default_category(),
            m: default_m(),
            ef_construction: default_ef_construction(),
            tune_parameters: false,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
            model: default_model(),
        }
    }
}

impl Config {
    /// Load config from vectordash.toml in the current or parent directories,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Replace the API base URL when an override is set and not blank.
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(base_url = %url, "api base url overridden from environment");
            self.api.base_url = url;
        }
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Endpoints of the configured service.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api.base_url)
    }

    /// Chunking settings as library types.
    pub fn chunk_settings(&self) -> (ChunkMethod, ChunkConfig) {
        (
            self.chunking.method,
            ChunkConfig {
                size: self.chunking.size,
                overlap: self.chunking.overlap,
            },
        )
    }
}

/// Find vectordash.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Get the vectordash data directory (.vectordash/).
pub fn data_dir() -> Result<PathBuf> {
    let dir = std::env::current_dir()?.join(".vectordash");
    Ok(dir)
}

/// Get the history store file path.
pub fn history_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("history.json"))
}
