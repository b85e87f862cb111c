//! Reading embeddings and documents from disk.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Read an embedding from a JSON file.
///
/// Accepts a bare array of numbers, an object with an `embedding` array,
/// or an embed response (first entry of `embeddings`).
pub fn read_vector(path: &str) -> Result<Vec<f32>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path))?;
    let value: Value =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))?;
    parse_vector(&value).with_context(|| format!("No embedding found in {}", path))
}

pub fn parse_vector(value: &Value) -> Result<Vec<f32>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item.as_f64() {
                Some(x) => Ok(x as f32),
                None => bail!("element {} is not a number: {}", i, item),
            })
            .collect(),
        Value::Object(map) => {
            if let Some(vector) = map.get("embedding") {
                return parse_vector(vector);
            }
            match map.get("embeddings").and_then(Value::as_array) {
                Some(list) if !list.is_empty() => parse_vector(&list[0]),
                Some(_) => bail!("embed response holds no embeddings"),
                None => bail!("expected an `embedding` or `embeddings` field"),
            }
        }
        other => bail!("expected an array or object, found {}", other),
    }
}

/// MIME type for a supported text file, by extension.
pub fn text_file_type(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "text" => Ok("text/plain"),
        "md" | "markdown" => Ok("text/markdown"),
        _ => bail!(
            "Unsupported file type: {} (expected .txt or .md)",
            path.display()
        ),
    }
}
