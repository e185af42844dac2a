//! # Command-Line Interface
//!
//! This module implements the command-line interface for the swipe input
//! engine. It defines the CLI structure, command parsing, and execution
//! logic for offline graph building and online decoding alike.
//!
//! ## Commands
//!
//! The application supports four main commands:
//!
//! - `build`: Builds the word graph and template store from a sorted
//!   lexicon and serializes them to a resource file.
//! - `decode`: Loads a resource file and a captured gesture, and prints the
//!   ranked swipe-decode candidates.
//! - `lookup`: Reports dictionary membership and word id for a single word.
//! - `inspect`: Prints resource statistics and, optionally, prefix search
//!   results.
//!
//! ## Output Formats
//!
//! `decode` supports two output formats:
//!
//! - `text`: Human-readable text format (default)
//! - `json`: JSON format for programmatic consumption

use crate::builder::GraphBuilder;
use crate::config::EngineConfig;
use crate::decoder::SwipeDecoder;
use crate::gesture::GesturePoint;
use crate::graph::WordGraph;
use crate::language_model::NeutralModel;
use crate::layout::KeyLayout;
use crate::templates::TemplateStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

/// Output format for decode results.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for programmatic consumption
    Json,
}

/// Main CLI structure for the swipe input engine.
#[derive(Parser)]
#[command(name = "swipe-input-engine")]
#[command(about = "A CLI tool for building and exercising the swipe input engine")]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Enumeration of available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Builds a word graph and template store from a sorted lexicon and
    /// serializes the graph to a resource file.
    Build {
        /// Path to a lexicon file, one lowercase word per line,
        /// lexicographically sorted.
        #[arg(short, long)]
        lexicon: PathBuf,
        /// Key layout to generate templates against.
        #[arg(long, default_value = "qwerty")]
        layout: String,
        /// Output path for the serialized word-graph resource file.
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Decodes a captured gesture against a built resource file.
    Decode {
        /// Path to a serialized word-graph resource file.
        #[arg(short, long)]
        resource: PathBuf,
        /// Path to a JSON-encoded `Vec<GesturePoint>`.
        #[arg(short, long)]
        gesture: PathBuf,
        /// Preceding text context passed to the language model.
        #[arg(long, default_value = "")]
        context: String,
        /// Key layout the gesture was captured against.
        #[arg(long, default_value = "qwerty")]
        layout: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Reports dictionary membership and word id for a single word.
    Lookup {
        /// Path to a serialized word-graph resource file.
        #[arg(short, long)]
        resource: PathBuf,
        /// Word to look up.
        #[arg(short, long)]
        word: String,
    },
    /// Prints resource statistics and, optionally, prefix search results.
    Inspect {
        /// Path to a serialized word-graph resource file.
        #[arg(short, long)]
        resource: PathBuf,
        /// If given, lists words beginning with this prefix.
        #[arg(long)]
        prefix: Option<String>,
        /// Maximum number of prefix-search results to print.
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn layout_by_name(name: &str) -> Result<KeyLayout> {
    match name {
        "qwerty" => Ok(KeyLayout::qwerty()),
        other => Err(anyhow::anyhow!("unknown key layout: {other}")),
    }
}

/// Main CLI execution function.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            lexicon,
            layout,
            out,
        } => run_build(&lexicon, &layout, &out),
        Commands::Decode {
            resource,
            gesture,
            context,
            layout,
            format,
        } => run_decode(&resource, &gesture, &context, &layout, &format),
        Commands::Lookup { resource, word } => run_lookup(&resource, &word),
        Commands::Inspect {
            resource,
            prefix,
            limit,
        } => run_inspect(&resource, prefix.as_deref(), limit),
    }
}

fn run_build(lexicon: &std::path::Path, layout_name: &str, out: &std::path::Path) -> Result<()> {
    let text = std::fs::read_to_string(lexicon)
        .with_context(|| format!("reading lexicon {}", lexicon.display()))?;
    let words: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase)
        .collect();
    log::info!("building graph from {} lexicon lines", words.len());

    let graph = GraphBuilder::build(words)?;
    let layout = layout_by_name(layout_name)?;
    let config = EngineConfig::default();
    let (templates, skipped) = TemplateStore::build(&graph, &layout, &config);
    log::info!(
        "built {} templates ({} words skipped as unmappable)",
        templates.templates().len(),
        skipped
    );

    let file = std::fs::File::create(out)
        .with_context(|| format!("creating resource file {}", out.display()))?;
    crate::serialize::write(&graph, std::io::BufWriter::new(file))
        .with_context(|| format!("writing resource file {}", out.display()))?;

    println!(
        "wrote {} nodes, {} words, {} templates to {} ({} skipped)",
        graph.node_count(),
        graph.all_words().len(),
        templates.templates().len(),
        out.display(),
        skipped
    );
    Ok(())
}

fn run_decode(
    resource: &std::path::Path,
    gesture_path: &std::path::Path,
    context: &str,
    layout_name: &str,
    format: &OutputFormat,
) -> Result<()> {
    let graph = WordGraph::load(resource)
        .with_context(|| format!("loading resource {}", resource.display()))?;
    let layout = layout_by_name(layout_name)?;
    let config = EngineConfig::default();
    let (templates, _) = TemplateStore::build(&graph, &layout, &config);

    let gesture_json = std::fs::read_to_string(gesture_path)
        .with_context(|| format!("reading gesture file {}", gesture_path.display()))?;
    let gesture: Vec<GesturePoint> = serde_json::from_str(&gesture_json)
        .with_context(|| format!("parsing gesture file {}", gesture_path.display()))?;

    let decoder = SwipeDecoder::new(
        config,
        Arc::new(graph),
        Arc::new(templates),
        Arc::new(layout),
        Arc::new(NeutralModel),
    );
    let candidates = decoder.decode(&gesture, context);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        OutputFormat::Text => {
            if candidates.is_empty() {
                println!("no candidates");
            }
            for (rank, c) in candidates.iter().enumerate() {
                println!(
                    "{}. {} (combined={:.3}, geometric={:.3}, language={:.3})",
                    rank + 1,
                    c.word,
                    c.combined_score,
                    c.geometric_score,
                    c.language_score
                );
            }
        }
    }
    Ok(())
}

fn run_lookup(resource: &std::path::Path, word: &str) -> Result<()> {
    let graph = WordGraph::load(resource)
        .with_context(|| format!("loading resource {}", resource.display()))?;
    match graph.word_id(word) {
        Some(id) => println!("{word}: contains=true word_id={id}"),
        None => println!("{word}: contains=false"),
    }
    Ok(())
}

fn run_inspect(resource: &std::path::Path, prefix: Option<&str>, limit: usize) -> Result<()> {
    let graph = WordGraph::load(resource)
        .with_context(|| format!("loading resource {}", resource.display()))?;
    println!("nodes: {}", graph.node_count());
    println!("words: {}", graph.all_words().len());

    if let Some(prefix) = prefix {
        let matches = graph.prefix_search(prefix, limit);
        println!("prefix \"{prefix}\" ({} shown):", matches.len());
        for word in matches {
            println!("  {word}");
        }
    }
    Ok(())
}
