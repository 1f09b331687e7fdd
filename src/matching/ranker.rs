//! Similarity ranking and the confidence gate

use crate::matching::embedding::cosine_similarity;

/// Ranks candidate embeddings against a query embedding by cosine
/// similarity.
pub struct SimilarityRanker {
    top_k: usize,
}

impl SimilarityRanker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Score every candidate row against the query and return the top-k
    /// `(candidate_index, score)` pairs, descending by score. The sort is
    /// stable, so equal scores keep ascending original order.
    pub fn rank(&self, query: &[f32], candidates: &[&[f32]]) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = candidates
            .iter()
            .enumerate()
            .map(|(index, row)| (index, cosine_similarity(query, row)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.top_k);
        scored
    }
}

/// Rejects a ranked result set if any of its scores falls below the
/// acceptance threshold. All or nothing: partial sets of "good enough"
/// matches are never returned.
pub struct ConfidenceGate {
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Inspect scores in rank order and return the first sub-threshold
    /// score, or `None` if the whole set qualifies.
    pub fn check(&self, scores: &[f32]) -> Option<f32> {
        scores.iter().copied().find(|score| *score < self.threshold)
    }
}
