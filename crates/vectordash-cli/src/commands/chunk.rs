//! Split documents and build index payloads.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, warn};
use vectordash::prelude::*;

use crate::config::Config;
use crate::input::text_file_type;

pub struct ChunkArgs {
    pub paths: Vec<String>,
    pub method: Option<ChunkMethod>,
    pub size: Option<usize>,
    pub overlap: Option<usize>,
    pub template: Option<String>,
    pub collection: Option<String>,
    pub category: Option<String>,
    pub output: Option<String>,
    pub verbose: bool,
}

pub fn run(args: ChunkArgs) -> Result<()> {
    let config = Config::load()?;

    let (method, settings) = resolve_settings(
        &config,
        args.template.as_deref(),
        args.method,
        args.size,
        args.overlap,
    )?;
    let chunker = Chunker::new(method, settings)?;

    let collection = args
        .collection
        .unwrap_or_else(|| config.index.collection.clone());
    let url = config.endpoints().index(&collection)?;
    let category = args
        .category
        .unwrap_or_else(|| config.index.category.clone());

    let files: Vec<PathBuf> = args.paths.iter().map(PathBuf::from).collect();
    for file in &files {
        if !file.is_file() {
            bail!("File does not exist: {}", file.display());
        }
    }

    // stdout carries the payload when no output file is given
    let to_file = args.output.is_some();
    if to_file {
        println!(
            "{} Splitting {} files ({}, size {}, overlap {})...",
            "→".blue(),
            files.len().to_string().cyan(),
            method,
            settings.size,
            settings.overlap
        );
    }

    let pb = if to_file && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut documents = Vec::new();
    for file in &files {
        let file_type = text_file_type(file)?;
        let size_bytes = std::fs::metadata(file)
            .with_context(|| format!("Failed to read: {}", file.display()))?
            .len();
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let source = DocumentSource::new(name, size_bytes, file_type).with_category(category.clone());
        source.check_size()?;

        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        let fragments = chunker.split(&content);
        if fragments.is_empty() {
            warn!(file = %file.display(), "no text to index");
        }
        debug!(file = %file.display(), fragments = fragments.len(), "document split");

        if args.verbose {
            pb.set_message(source.name.clone());
        }
        documents.extend(source.to_documents(&fragments, method));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if documents.is_empty() {
        bail!("No text found in the given files");
    }

    let request = IndexRequest::new(documents)
        .with_hnsw(config.index.m, config.index.ef_construction)
        .with_tuning(config.index.tune_parameters);
    let body = serde_json::to_string_pretty(&request)?;

    match args.output {
        Some(output) => {
            std::fs::write(&output, body)
                .with_context(|| format!("Failed to write: {}", output))?;
            println!(
                "  {} {} records for {}",
                "✓".green(),
                request.documents.len().to_string().cyan(),
                collection.cyan()
            );
            println!();
            println!("{} Payload written to {}", "✓".green().bold(), output);
            println!("  POST {}", url.dimmed());
        }
        None => {
            println!("{}", body);
            eprintln!("{} POST {}", "→".blue(), url);
        }
    }

    Ok(())
}

/// Build a payload for one hand-written document.
pub fn document(
    text: &str,
    id: Option<&str>,
    source: &str,
    category: Option<&str>,
    metadata: &str,
    collection: Option<&str>,
) -> Result<()> {
    let config = Config::load()?;
    let collection = collection.unwrap_or(&config.index.collection);
    let url = config.endpoints().index(collection)?;

    let doc = IndexDocument::manual(ManualDocument {
        id,
        text,
        source,
        category: category.unwrap_or(&config.index.category),
        extra_metadata: metadata,
    })?;
    debug!(id = %doc.id, "manual document built");

    let request = IndexRequest::new(vec![doc])
        .with_hnsw(config.index.m, config.index.ef_construction)
        .with_tuning(config.index.tune_parameters);

    println!("{}", serde_json::to_string_pretty(&request)?);
    eprintln!("{} POST {}", "→".blue(), url);

    Ok(())
}

/// Chunk settings from config, then template, then explicit flags.
fn resolve_settings(
    config: &Config,
    template: Option<&str>,
    method: Option<ChunkMethod>,
    size: Option<usize>,
    overlap: Option<usize>,
) -> Result<(ChunkMethod, ChunkConfig)> {
    let (mut resolved_method, mut settings) = config.chunk_settings();

    if let Some(id) = template {
        let Some(template) = find_template(id) else {
            bail!(
                "Unknown template: {}. Run {} to list them.",
                id,
                "vectordash templates".cyan()
            );
        };
        (resolved_method, settings) = template.chunk_settings();
    }

    if let Some(method) = method {
        resolved_method = method;
    }
    if let Some(size) = size {
        settings.size = size;
    }
    if let Some(overlap) = overlap {
        settings.overlap = overlap;
    }

    Ok((resolved_method, settings))
}
