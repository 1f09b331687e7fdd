//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

/// Default locations of the corpus and model files. Each can be overridden
/// per invocation on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub corpus_path: PathBuf,
    pub vectors_path: PathBuf,
    pub embeddings_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Dimensionality of the word vectors and corpus embeddings.
    pub embedding_dim: usize,
    /// Number of postings returned on a successful search.
    pub top_k: usize,
    /// Minimum number of postings that must survive categorical filtering.
    pub min_candidates: usize,
    /// Every returned score must reach this cosine similarity.
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".job-matcher")
            .join("data");

        Self {
            data: DataConfig {
                corpus_path: data_dir.join("corpus.json"),
                vectors_path: data_dir.join("glove_vectors.json"),
                embeddings_path: data_dir.join("corpus_embeddings.json"),
            },
            matching: MatchingConfig {
                embedding_dim: 300,
                top_k: 3,
                min_candidates: 3,
                similarity_threshold: 0.6,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path, failing if the file is absent.
    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if !config_path.exists() {
            return Err(JobMatcherError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.matching.embedding_dim == 0 {
            return Err(JobMatcherError::Configuration(
                "embedding_dim must be greater than zero".to_string(),
            ));
        }
        if self.matching.top_k == 0 {
            return Err(JobMatcherError::Configuration(
                "top_k must be greater than zero".to_string(),
            ));
        }
        if self.matching.min_candidates < self.matching.top_k {
            return Err(JobMatcherError::Configuration(format!(
                "min_candidates ({}) must be at least top_k ({})",
                self.matching.min_candidates, self.matching.top_k
            )));
        }
        Ok(())
    }
}
