//! Job matcher: semantic job posting search over a precomputed corpus

use clap::Parser;
use job_matcher::cli::{self, Cli, Commands, ConfigAction, CorpusAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::corpus::posting::{FilterSelection, FilterValue};
use job_matcher::corpus::{load_corpus, load_word_vectors};
use job_matcher::error::{JobMatcherError, Result};
use job_matcher::matching::MatchingPipeline;
use job_matcher::output::{ConsoleFormatter, JsonFormatter, OutputFormatter};
use log::{error, info};
use std::collections::BTreeSet;
use std::process;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match cli.config.clone() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Search {
            query,
            corpus,
            vectors,
            embeddings,
            state,
            city,
            job_type,
            sponsor,
            application,
            output,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(JobMatcherError::InvalidInput)?;

            let corpus_path = corpus.unwrap_or_else(|| config.data.corpus_path.clone());
            let vectors_path = vectors.unwrap_or_else(|| config.data.vectors_path.clone());
            let embeddings_path =
                embeddings.unwrap_or_else(|| config.data.embeddings_path.clone());

            info!("Loading corpus and model files");
            let table = load_word_vectors(&vectors_path, config.matching.embedding_dim)?;
            let loaded = load_corpus(
                &corpus_path,
                &embeddings_path,
                config.matching.embedding_dim,
            )?;
            let pipeline = MatchingPipeline::new(
                loaded.postings,
                loaded.embeddings,
                table,
                &config.matching,
            )?;

            let filters = FilterSelection {
                state: FilterValue::from(state),
                city: FilterValue::from(city),
                job_type: FilterValue::from(job_type),
                sponsor_type: FilterValue::from(sponsor),
                application_type: FilterValue::from(application),
            };

            info!("Searching {} postings", pipeline.posting_count());
            let outcome = pipeline.search(&query, &filters);

            let formatter: Box<dyn OutputFormatter> = match output_format {
                OutputFormat::Console => {
                    Box::new(ConsoleFormatter::new(config.output.color_output))
                }
                OutputFormat::Json => Box::new(JsonFormatter::new(true)),
            };
            println!("{}", formatter.format_outcome(&outcome)?);
            Ok(())
        }

        Commands::Corpus { action } => match action {
            CorpusAction::Stats { corpus, embeddings } => {
                let corpus_path = corpus.unwrap_or_else(|| config.data.corpus_path.clone());
                let embeddings_path =
                    embeddings.unwrap_or_else(|| config.data.embeddings_path.clone());

                let loaded = load_corpus(
                    &corpus_path,
                    &embeddings_path,
                    config.matching.embedding_dim,
                )?;
                print_corpus_stats(&loaded.postings);
                Ok(())
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Reset) => {
                let config = Config::reset()?;
                println!("Configuration reset to defaults:");
                print_config(&config)
            }
            Some(ConfigAction::Show) | None => print_config(&config),
        },
    }
}

fn print_config(config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
    println!("{}", content);
    Ok(())
}

fn print_corpus_stats(postings: &[job_matcher::corpus::JobPosting]) {
    println!("Postings: {}", postings.len());

    let states: BTreeSet<&str> = postings.iter().map(|p| p.state.as_str()).collect();
    let cities: BTreeSet<&str> = postings.iter().map(|p| p.city.as_str()).collect();
    let job_types: BTreeSet<&str> = postings.iter().map(|p| p.job_type.as_str()).collect();
    let sponsors: BTreeSet<&str> = postings.iter().map(|p| p.sponsor_type.as_str()).collect();
    let applications: BTreeSet<&str> = postings
        .iter()
        .map(|p| p.application_type.as_str())
        .collect();

    println!("States: {}", states.len());
    println!("Cities: {}", cities.len());
    println!("Job types: {}", join_sorted(&job_types));
    println!("Sponsor types: {}", join_sorted(&sponsors));
    println!("Application types: {}", join_sorted(&applications));
}

fn join_sorted(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<_>>().join(", ")
}
