//! Loading of the job corpus, word-vector table, and precomputed embeddings
//!
//! Everything here runs once at startup. Malformed or misaligned data is a
//! fatal `MissingResource` error before the first query, never a per-query
//! condition.

use crate::corpus::posting::JobPosting;
use crate::error::{JobMatcherError, Result};
use crate::matching::embedding::WordVectorTable;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Sentinel state value marking rows without usable location data.
const NO_INFO_STATE: &str = "No Info";

/// Postings and their row-aligned embedding matrix, post-exclusion.
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub postings: Vec<JobPosting>,
    pub embeddings: Vec<Vec<f32>>,
}

/// Load the corpus and its precomputed embedding matrix together.
///
/// The embeddings file is row-aligned with the raw corpus file. Rows whose
/// state is "No Info" are dropped from both sides in the same pass so the
/// retained matrix stays aligned with the retained postings; `corpus_index`
/// is assigned over the retained rows.
pub fn load_corpus(
    corpus_path: &Path,
    embeddings_path: &Path,
    embedding_dim: usize,
) -> Result<LoadedCorpus> {
    let raw_postings = read_postings(corpus_path)?;
    let raw_embeddings = load_embeddings(embeddings_path)?;

    if raw_postings.len() != raw_embeddings.len() {
        return Err(JobMatcherError::MissingResource(format!(
            "Corpus has {} rows but embedding matrix has {} rows",
            raw_postings.len(),
            raw_embeddings.len()
        )));
    }

    let mut postings = Vec::new();
    let mut embeddings = Vec::new();
    for (mut posting, embedding) in raw_postings.into_iter().zip(raw_embeddings) {
        if posting.state == NO_INFO_STATE {
            continue;
        }
        if embedding.len() != embedding_dim {
            return Err(JobMatcherError::MissingResource(format!(
                "Embedding row {} has dimensionality {} (expected {})",
                postings.len(),
                embedding.len(),
                embedding_dim
            )));
        }
        posting.state = title_case(&posting.state);
        posting.city = title_case(&posting.city);
        posting.corpus_index = postings.len();
        postings.push(posting);
        embeddings.push(embedding);
    }

    info!(
        "Loaded {} postings from {} (embedding dimensionality {})",
        postings.len(),
        corpus_path.display(),
        embedding_dim
    );

    Ok(LoadedCorpus {
        postings,
        embeddings,
    })
}

/// Load the token -> vector table, validating every vector's dimensionality.
pub fn load_word_vectors(vectors_path: &Path, embedding_dim: usize) -> Result<WordVectorTable> {
    let content = std::fs::read_to_string(vectors_path).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Cannot read word vectors from {}: {}",
            vectors_path.display(),
            e
        ))
    })?;

    let vectors: HashMap<String, Vec<f32>> = serde_json::from_str(&content).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Malformed word vector table {}: {}",
            vectors_path.display(),
            e
        ))
    })?;

    for (token, vector) in &vectors {
        if vector.len() != embedding_dim {
            return Err(JobMatcherError::MissingResource(format!(
                "Word vector for '{}' has dimensionality {} (expected {})",
                token,
                vector.len(),
                embedding_dim
            )));
        }
    }

    info!(
        "Loaded {} word vectors from {}",
        vectors.len(),
        vectors_path.display()
    );

    WordVectorTable::new(vectors, embedding_dim)
}

/// Load the raw embedding matrix, one row per raw corpus row.
pub fn load_embeddings(embeddings_path: &Path) -> Result<Vec<Vec<f32>>> {
    let content = std::fs::read_to_string(embeddings_path).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Cannot read embeddings from {}: {}",
            embeddings_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Malformed embedding matrix {}: {}",
            embeddings_path.display(),
            e
        ))
    })
}

fn read_postings(corpus_path: &Path) -> Result<Vec<JobPosting>> {
    let content = std::fs::read_to_string(corpus_path).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Cannot read corpus from {}: {}",
            corpus_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        JobMatcherError::MissingResource(format!(
            "Malformed corpus {}: {}",
            corpus_path.display(),
            e
        ))
    })
}

/// Capitalize the first letter of each whitespace-separated word, lowering
/// the rest, matching how the corpus normalizes state and city names.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn corpus_json() -> &'static str {
        r#"[
            {"state": "california", "city": "san jose", "job_type": "Full-Time",
             "sponsor_type": "Sponsored", "application_type": "Online",
             "posting_url": "https://jobs.example.com/1"},
            {"state": "No Info", "city": "nowhere", "job_type": "Full-Time",
             "sponsor_type": "Sponsored", "application_type": "Online",
             "posting_url": "https://jobs.example.com/2"},
            {"state": "TEXAS", "city": "austin", "job_type": "Part-Time",
             "sponsor_type": "Not Sponsored", "application_type": "Email",
             "posting_url": "https://jobs.example.com/3"}
        ]"#
    }

    #[test]
    fn test_load_corpus_excludes_no_info_and_keeps_alignment() {
        let corpus = write_temp(corpus_json());
        let embeddings = write_temp("[[1.0, 0.0], [9.0, 9.0], [0.0, 1.0]]");

        let loaded = load_corpus(corpus.path(), embeddings.path(), 2).unwrap();

        assert_eq!(loaded.postings.len(), 2);
        assert_eq!(loaded.embeddings.len(), 2);
        assert_eq!(loaded.postings[0].state, "California");
        assert_eq!(loaded.postings[0].city, "San Jose");
        assert_eq!(loaded.postings[1].state, "Texas");
        // The "No Info" embedding row is dropped with its posting.
        assert_eq!(loaded.embeddings[1], vec![0.0, 1.0]);
        assert_eq!(loaded.postings[0].corpus_index, 0);
        assert_eq!(loaded.postings[1].corpus_index, 1);
    }

    #[test]
    fn test_load_corpus_rejects_row_count_mismatch() {
        let corpus = write_temp(corpus_json());
        let embeddings = write_temp("[[1.0, 0.0], [0.0, 1.0]]");

        let result = load_corpus(corpus.path(), embeddings.path(), 2);

        assert!(matches!(
            result,
            Err(JobMatcherError::MissingResource(_))
        ));
    }

    #[test]
    fn test_load_corpus_rejects_dimension_mismatch() {
        let corpus = write_temp(corpus_json());
        let embeddings = write_temp("[[1.0, 0.0, 0.5], [9.0, 9.0, 9.0], [0.0, 1.0, 0.5]]");

        let result = load_corpus(corpus.path(), embeddings.path(), 2);

        assert!(matches!(
            result,
            Err(JobMatcherError::MissingResource(_))
        ));
    }

    #[test]
    fn test_load_word_vectors_rejects_bad_dimensionality() {
        let vectors = write_temp(r#"{"rust": [1.0, 0.0], "developer": [0.5]}"#);

        let result = load_word_vectors(vectors.path(), 2);

        assert!(matches!(
            result,
            Err(JobMatcherError::MissingResource(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_missing_resource() {
        let result = load_embeddings(Path::new("/nonexistent/embeddings.json"));

        assert!(matches!(
            result,
            Err(JobMatcherError::MissingResource(_))
        ));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("TEXAS"), "Texas");
        assert_eq!(title_case(""), "");
    }
}
