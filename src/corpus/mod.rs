//! Job corpus loading and posting types

pub mod loader;
pub mod posting;

pub use loader::{load_corpus, load_embeddings, load_word_vectors, LoadedCorpus};
pub use posting::{FilterSelection, FilterValue, JobPosting};
