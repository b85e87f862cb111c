//! vectordash CLI - Compare embeddings and prepare documents for indexing.

mod commands;
mod config;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vectordash::prelude::ChunkMethod;

#[derive(Parser)]
#[command(name = "vectordash")]
#[command(author, version, about = "vectordash - Embedding comparison and index preparation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new vectordash project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Split documents into fragments and build an index payload
    Chunk {
        /// Text files to split
        #[arg(required = true)]
        paths: Vec<String>,

        /// Splitting method: chunks, pages or whole
        #[arg(short, long)]
        method: Option<ChunkMethod>,

        /// Fragment length in characters
        #[arg(short, long)]
        size: Option<usize>,

        /// Characters shared by consecutive fragments
        #[arg(short = 'l', long)]
        overlap: Option<usize>,

        /// Collection template supplying the chunk preset
        #[arg(short, long)]
        template: Option<String>,

        /// Target collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Category stored in each record's metadata
        #[arg(long)]
        category: Option<String>,

        /// Write the payload here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build an index payload for a single hand-written document
    Document {
        /// Document text
        text: String,

        /// Record id (default: doc_<unix millis>)
        #[arg(long)]
        id: Option<String>,

        /// Source name stored in metadata
        #[arg(long, default_value = "manual")]
        source: String,

        /// Category stored in metadata
        #[arg(long)]
        category: Option<String>,

        /// Extra metadata as a JSON object
        #[arg(long, default_value = "")]
        metadata: String,

        /// Target collection
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Compare two embeddings
    Compare {
        /// First embedding file (JSON)
        first: String,

        /// Second embedding file (JSON)
        second: String,

        /// Number of dimensions to show side by side
        #[arg(short, long, default_value = "0")]
        dims: usize,

        /// Seed for picking the displayed dimensions
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print the length of an embedding
    Norm {
        /// Embedding file (JSON)
        path: String,
    },

    /// Build an embed request body from a text file
    EmbedRequest {
        /// Text file
        path: String,

        /// One text per non-blank line
        #[arg(long)]
        lines: bool,
    },

    /// Manage the local embedding history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// List collection templates
    Templates,

    /// Build a search request body
    SearchParams {
        /// Query text
        query: Option<String>,

        /// Embedding file to search with instead of the query text
        #[arg(long)]
        vector: Option<String>,

        /// Target collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Maximum results
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Use the service's native ANN search
        #[arg(long)]
        native: bool,

        /// ef parameter for native search
        #[arg(long, default_value = "100")]
        ef: u32,

        /// Score every document in the collection
        #[arg(long)]
        score_all: bool,
    },

    /// Display a saved search response
    SearchResults {
        /// Search response file (JSON)
        path: String,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Add an embedding to the history
    Add {
        /// Embedding file (JSON)
        path: String,

        /// Text the embedding was created from
        #[arg(short, long)]
        text: String,
    },

    /// Add every embedding from a saved embed response
    Import {
        /// Embed response file (JSON)
        response: String,

        /// Text file the embeddings were requested for
        input: String,

        /// The request used one text per line
        #[arg(long)]
        lines: bool,
    },

    /// List stored embeddings
    List,

    /// Find embeddings by text
    Search {
        /// Case-insensitive text to look for
        query: String,
    },

    /// Compare two stored embeddings
    Compare {
        /// Index of the first embedding
        first: usize,

        /// Index of the second embedding
        second: usize,

        /// Number of dimensions to show side by side
        #[arg(short, long, default_value = "0")]
        dims: usize,

        /// Seed for picking the displayed dimensions
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Remove one stored embedding
    Remove {
        /// Index of the embedding
        index: usize,
    },

    /// Remove all stored embeddings
    Clear,

    /// Export the history as JSON
    Export {
        /// Output file path
        output: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Chunk {
            paths,
            method,
            size,
            overlap,
            template,
            collection,
            category,
            output,
        } => commands::chunk::run(commands::chunk::ChunkArgs {
            paths,
            method,
            size,
            overlap,
            template,
            collection,
            category,
            output,
            verbose: cli.verbose,
        }),
        Commands::Document {
            text,
            id,
            source,
            category,
            metadata,
            collection,
        } => commands::chunk::document(
            &text,
            id.as_deref(),
            &source,
            category.as_deref(),
            &metadata,
            collection.as_deref(),
        ),
        Commands::Compare {
            first,
            second,
            dims,
            seed,
        } => commands::compare::run(&first, &second, dims, seed),
        Commands::Norm { path } => commands::compare::show_norm(&path),
        Commands::EmbedRequest { path, lines } => commands::search::embed_request(&path, lines),
        Commands::History { command } => match command {
            HistoryCommands::Add { path, text } => commands::history::add(&path, &text),
            HistoryCommands::Import {
                response,
                input,
                lines,
            } => commands::history::import(&response, &input, lines),
            HistoryCommands::List => commands::history::list(),
            HistoryCommands::Search { query } => commands::history::search(&query),
            HistoryCommands::Compare {
                first,
                second,
                dims,
                seed,
            } => commands::history::compare(first, second, dims, seed),
            HistoryCommands::Remove { index } => commands::history::remove(index),
            HistoryCommands::Clear => commands::history::clear(),
            HistoryCommands::Export { output } => commands::history::export(&output),
        },
        Commands::Templates => commands::templates::run(),
        Commands::SearchParams {
            query,
            vector,
            collection,
            limit,
            native,
            ef,
            score_all,
        } => commands::search::params(commands::search::SearchArgs {
            query,
            vector,
            collection,
            limit,
            native,
            ef,
            score_all,
        }),
        Commands::SearchResults { path } => commands::search::results(&path),
    }
}
