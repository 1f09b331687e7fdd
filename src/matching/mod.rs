//! The matching engine: normalization, embedding, filtering, ranking

pub mod embedding;
pub mod filter;
pub mod pipeline;
pub mod ranker;
pub mod text;

pub use embedding::{cosine_similarity, WordVectorTable};
pub use filter::CategoricalFilter;
pub use pipeline::{MatchingPipeline, RankedPosting, SearchOutcome};
pub use ranker::{ConfidenceGate, SimilarityRanker};
pub use text::TextNormalizer;
