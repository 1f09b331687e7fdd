//! CLI interface for the job matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Semantic job posting search with categorical filters")]
#[command(
    long_about = "Match a free-text skill description against a job posting catalog using word-vector embeddings, cosine similarity, and categorical filters"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search postings matching a skill description
    Search {
        /// Free-text skill description
        query: String,

        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Path to the word-vector table JSON file
        #[arg(long)]
        vectors: Option<PathBuf>,

        /// Path to the precomputed corpus embeddings JSON file
        #[arg(long)]
        embeddings: Option<PathBuf>,

        /// State filter; omit for Any
        #[arg(long)]
        state: Option<String>,

        /// City filter; only effective together with --state
        #[arg(long)]
        city: Option<String>,

        /// Job type filter; omit for Any
        #[arg(long = "job-type")]
        job_type: Option<String>,

        /// Sponsorship filter; omit for Any
        #[arg(long)]
        sponsor: Option<String>,

        /// Application type filter; omit for Any
        #[arg(long)]
        application: Option<String>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Corpus inspection commands
    Corpus {
        #[command(subcommand)]
        action: CorpusAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum CorpusAction {
    /// Show posting count and per-dimension distinct values
    Stats {
        /// Path to the corpus JSON file
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Path to the precomputed corpus embeddings JSON file
        #[arg(long)]
        embeddings: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}
