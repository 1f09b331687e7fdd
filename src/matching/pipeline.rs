//! Query orchestration: filter, embed, rank, gate

use crate::config::MatchingConfig;
use crate::corpus::posting::{FilterSelection, JobPosting};
use crate::error::{JobMatcherError, Result};
use crate::matching::embedding::WordVectorTable;
use crate::matching::filter::CategoricalFilter;
use crate::matching::ranker::{ConfidenceGate, SimilarityRanker};
use crate::matching::text::TextNormalizer;
use log::debug;
use serde::Serialize;

/// One posting in a successful result set; `rank` is 1-based for display.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPosting {
    pub rank: usize,
    pub score: f32,
    pub posting: JobPosting,
}

/// Every query resolves to one of these. The diagnostics are expected,
/// recoverable outcomes, not errors.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query text was empty or whitespace-only.
    EmptyQuery,
    /// Fewer postings survived filtering than the ranking stage requires.
    InsufficientCandidates { found: usize, required: usize },
    /// At least one top-ranked score fell below the acceptance threshold.
    LowConfidence { score: f32, threshold: f32 },
    Matches { matches: Vec<RankedPosting> },
}

/// The matching engine. All dependencies are injected at construction and
/// read-only afterwards, so one pipeline can serve queries from multiple
/// threads without locking.
pub struct MatchingPipeline {
    postings: Vec<JobPosting>,
    embeddings: Vec<Vec<f32>>,
    vectors: WordVectorTable,
    normalizer: TextNormalizer,
    ranker: SimilarityRanker,
    gate: ConfidenceGate,
    min_candidates: usize,
}

impl MatchingPipeline {
    /// Build a pipeline over a loaded corpus, validating the posting/matrix
    /// alignment invariants up front.
    pub fn new(
        postings: Vec<JobPosting>,
        embeddings: Vec<Vec<f32>>,
        vectors: WordVectorTable,
        config: &MatchingConfig,
    ) -> Result<Self> {
        if postings.len() != embeddings.len() {
            return Err(JobMatcherError::MissingResource(format!(
                "Corpus has {} postings but embedding matrix has {} rows",
                postings.len(),
                embeddings.len()
            )));
        }
        if vectors.dim() != config.embedding_dim {
            return Err(JobMatcherError::MissingResource(format!(
                "Word vector table has dimensionality {} (expected {})",
                vectors.dim(),
                config.embedding_dim
            )));
        }
        if let Some((index, row)) = embeddings
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != config.embedding_dim)
        {
            return Err(JobMatcherError::MissingResource(format!(
                "Embedding row {} has dimensionality {} (expected {})",
                index,
                row.len(),
                config.embedding_dim
            )));
        }

        Ok(Self {
            postings,
            embeddings,
            vectors,
            normalizer: TextNormalizer::new(),
            ranker: SimilarityRanker::new(config.top_k),
            gate: ConfidenceGate::new(config.similarity_threshold),
            min_candidates: config.min_candidates,
        })
    }

    pub fn posting_count(&self) -> usize {
        self.postings.len()
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    /// Run one query end to end. Always returns an outcome, never a fault,
    /// for any well-formed input.
    pub fn search(&self, query: &str, filters: &FilterSelection) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let eligible = CategoricalFilter::new(filters).apply(&self.postings);
        if eligible.len() < self.min_candidates {
            return SearchOutcome::InsufficientCandidates {
                found: eligible.len(),
                required: self.min_candidates,
            };
        }
        debug!("{} postings eligible after filtering", eligible.len());

        let tokens = self.normalizer.normalize(query);
        let query_embedding = self.vectors.average(&tokens);
        debug!("Query normalized to {} tokens", tokens.len());

        let candidate_rows: Vec<&[f32]> = eligible
            .iter()
            .map(|&index| self.embeddings[index].as_slice())
            .collect();
        let ranked = self.ranker.rank(&query_embedding, &candidate_rows);

        let scores: Vec<f32> = ranked.iter().map(|(_, score)| *score).collect();
        if let Some(score) = self.gate.check(&scores) {
            return SearchOutcome::LowConfidence {
                score,
                threshold: self.gate.threshold(),
            };
        }

        let matches = ranked
            .into_iter()
            .enumerate()
            .map(|(position, (candidate_index, score))| RankedPosting {
                rank: position + 1,
                score,
                posting: self.postings[eligible[candidate_index]].clone(),
            })
            .collect();

        SearchOutcome::Matches { matches }
    }
}
