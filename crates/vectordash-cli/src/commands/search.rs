//! Build embed and search payloads, display search results.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::Value;
use vectordash::prelude::*;

use crate::config::Config;
use crate::input::read_vector;

pub struct SearchArgs {
    pub query: Option<String>,
    pub vector: Option<String>,
    pub collection: Option<String>,
    pub limit: usize,
    pub native: bool,
    pub ef: u32,
    pub score_all: bool,
}

pub fn embed_request(path: &str, lines: bool) -> Result<()> {
    let config = Config::load()?;
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path))?;

    let request = if lines {
        EmbedRequest::lines(&text)
    } else {
        EmbedRequest::single(&text)
    };
    if request.is_empty() {
        bail!("No text found in {}", path);
    }

    println!("{}", serde_json::to_string_pretty(&request)?);
    eprintln!(
        "{} POST {} ({} texts)",
        "→".blue(),
        config.endpoints().embed(),
        request.texts().len()
    );
    Ok(())
}

pub fn params(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let collection = args
        .collection
        .unwrap_or_else(|| config.index.collection.clone());

    let mut params = match args.vector {
        Some(path) => SearchParams::vector(&collection, read_vector(&path)?, args.limit)?,
        None => {
            let query = args.query.as_deref().map(str::trim).unwrap_or_default();
            if query.is_empty() {
                bail!("Give a query text or --vector <file>");
            }
            SearchParams::text(&collection, query, args.limit)?
        }
    };
    if args.native {
        params = params.with_native_search(args.ef);
    }
    params = params.with_score_all(args.score_all);

    println!("{}", serde_json::to_string_pretty(&params)?);
    eprintln!("{} POST {}", "→".blue(), config.endpoints().search());
    Ok(())
}

pub fn results(path: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path))?;
    let response: SearchResponse = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid search response: {}", path))?;

    let hits = response.hits();
    if hits.is_empty() {
        println!("{} No results in {}", "•".yellow(), path.cyan());
        return Ok(());
    }

    println!(
        "{} {} results ({}, {:.1} ms):",
        "→".blue(),
        hits.len().to_string().cyan(),
        response.metric_used,
        response.search_time_ms
    );
    println!();

    for (i, hit) in hits.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", i + 1).blue(),
            hit.id.white().bold(),
            format!("({})", hit.score_label()).dimmed()
        );
        if !hit.text.is_empty() {
            println!("      {}", hit.text);
        }
        for (key, value) in &hit.metadata {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!("      {}: {}", key.dimmed(), value);
        }
    }

    println!();
    println!(
        "{} {} of {} documents",
        "✓".green(),
        hits.len().to_string().cyan(),
        response.total_found.to_string().cyan()
    );
    Ok(())
}
