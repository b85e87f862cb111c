//! Manage the local embedding history.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::info;
use vectordash::prelude::*;

use crate::commands::compare::print_report;
use crate::config::{history_path, Config};
use crate::input::read_vector;

const PREVIEW_CHARS: usize = 60;

fn open_history(config: &Config) -> Result<EmbeddingHistory<JsonFileStore>> {
    let path = history_path()?;
    let history = EmbeddingHistory::load(JsonFileStore::new(&path), config.history.limit)
        .with_context(|| format!("Failed to open history: {}", path.display()))?;
    Ok(history)
}

pub fn add(path: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Text must not be empty");
    }
    let config = Config::load()?;
    let mut history = open_history(&config)?;

    let vector = read_vector(path)?;
    let embedding = Embedding::new(text.trim(), vector);
    let dimensions = embedding.dimension();
    history.record(vec![embedding])?;

    println!(
        "{} Added embedding ({} dimensions), {} stored",
        "✓".green(),
        dimensions.to_string().cyan(),
        history.len().to_string().cyan()
    );
    Ok(())
}

pub fn import(response: &str, input: &str, lines: bool) -> Result<()> {
    let config = Config::load()?;
    let mut history = open_history(&config)?;

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input))?;
    let request = if lines {
        EmbedRequest::lines(&text)
    } else {
        EmbedRequest::single(&text)
    };
    if request.is_empty() {
        bail!("No text found in {}", input);
    }

    let raw = std::fs::read_to_string(response)
        .with_context(|| format!("Failed to read: {}", response))?;
    let reply: EmbedResponse = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid embed response: {}", response))?;
    let model = reply.model_used.clone();

    let recorded = history.record(reply.into_embeddings(&request)?)?;
    info!(recorded, model = %model, "embed response imported");

    println!(
        "{} Imported {} embeddings, {} stored",
        "✓".green(),
        recorded.to_string().cyan(),
        history.len().to_string().cyan()
    );
    Ok(())
}

pub fn list() -> Result<()> {
    let config = Config::load()?;
    let history = open_history(&config)?;

    if history.is_empty() {
        println!("{} No embeddings stored", "•".yellow());
        return Ok(());
    }

    println!(
        "{} {} of {} embeddings (total created: {}):",
        "→".blue(),
        history.len().to_string().cyan(),
        history.limit(),
        history.total_created().to_string().cyan()
    );
    println!();
    for (i, embedding) in history.entries().iter().enumerate() {
        print_entry(i, embedding);
    }
    Ok(())
}

pub fn search(query: &str) -> Result<()> {
    let config = Config::load()?;
    let history = open_history(&config)?;

    let matches = history.search(query);
    if matches.is_empty() {
        println!("{} No embeddings match: {}", "•".yellow(), query.cyan());
        return Ok(());
    }

    println!("{} Embeddings matching {}:", "→".blue(), query.cyan().bold());
    println!();
    for (i, embedding) in &matches {
        print_entry(*i, embedding);
    }
    println!();
    println!("{} {} matches", "✓".green(), matches.len().to_string().cyan());
    Ok(())
}

pub fn compare(first: usize, second: usize, dims: usize, seed: u64) -> Result<()> {
    let config = Config::load()?;
    let history = open_history(&config)?;

    let report = history.compare(first, second)?;
    let (Some(a), Some(b)) = (history.get(first), history.get(second)) else {
        bail!("No embedding at index {} or {}", first, second);
    };

    println!("{} [{}] {}", "→".blue(), first, a.preview(PREVIEW_CHARS).white());
    println!("  [{}] {}", second, b.preview(PREVIEW_CHARS).white());
    print_report(&report, &a.vector, &b.vector, dims, seed);
    Ok(())
}

pub fn remove(index: usize) -> Result<()> {
    let config = Config::load()?;
    let mut history = open_history(&config)?;

    let removed = history.remove(index)?;
    println!(
        "{} Removed [{}] {}",
        "✓".green(),
        index,
        removed.preview(PREVIEW_CHARS)
    );
    Ok(())
}

pub fn clear() -> Result<()> {
    let config = Config::load()?;
    let mut history = open_history(&config)?;

    let count = history.len();
    history.clear()?;
    println!(
        "{} Cleared {} embeddings",
        "✓".green(),
        count.to_string().cyan()
    );
    Ok(())
}

pub fn export(output: &str) -> Result<()> {
    let config = Config::load()?;
    let history = open_history(&config)?;

    let export = history.export(&config.history.model);
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(output, json).with_context(|| format!("Failed to write: {}", output))?;

    println!(
        "{} Exported {} embeddings to {}",
        "✓".green().bold(),
        export.embeddings.len().to_string().cyan(),
        output
    );
    Ok(())
}

fn print_entry(index: usize, embedding: &Embedding) {
    println!(
        "  {} {}",
        format!("[{}]", index).blue(),
        embedding.preview(PREVIEW_CHARS).white().bold()
    );
    println!(
        "      {} dims  norm {:.4}  {}",
        embedding.dimensions,
        embedding.norm,
        embedding.created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
}
