//! Integration tests for the job matcher

use job_matcher::config::MatchingConfig;
use job_matcher::corpus::posting::{FilterSelection, FilterValue, JobPosting};
use job_matcher::corpus::{load_corpus, load_word_vectors};
use job_matcher::matching::embedding::WordVectorTable;
use job_matcher::matching::pipeline::{MatchingPipeline, SearchOutcome};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn config() -> MatchingConfig {
    MatchingConfig {
        embedding_dim: 3,
        top_k: 3,
        min_candidates: 3,
        similarity_threshold: 0.6,
    }
}

fn posting(index: usize, state: &str, city: &str, job_type: &str) -> JobPosting {
    JobPosting {
        state: state.to_string(),
        city: city.to_string(),
        job_type: job_type.to_string(),
        sponsor_type: "Sponsored".to_string(),
        application_type: "Online".to_string(),
        posting_url: format!("https://jobs.example.com/{}", index),
        corpus_index: index,
    }
}

/// Word vectors spanning two skill areas so queries separate the corpus.
fn vectors() -> WordVectorTable {
    let mut map = HashMap::new();
    map.insert("rust".to_string(), vec![1.0, 0.0, 0.0]);
    map.insert("backend".to_string(), vec![0.9, 0.1, 0.0]);
    map.insert("developer".to_string(), vec![0.7, 0.3, 0.0]);
    map.insert("nurse".to_string(), vec![0.0, 0.0, 1.0]);
    map.insert("care".to_string(), vec![0.0, 0.1, 0.9]);
    WordVectorTable::new(map, 3).unwrap()
}

/// Three engineering postings and two nursing postings, embedded in the
/// same two skill areas as the word vectors.
fn pipeline() -> MatchingPipeline {
    let postings = vec![
        posting(0, "California", "San Jose", "Full-Time"),
        posting(1, "California", "Fresno", "Full-Time"),
        posting(2, "Texas", "Austin", "Part-Time"),
        posting(3, "Texas", "Dallas", "Full-Time"),
        posting(4, "Texas", "Houston", "Full-Time"),
    ];
    let embeddings = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.9, 0.1, 0.0],
        vec![0.8, 0.2, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 0.1, 0.9],
    ];
    MatchingPipeline::new(postings, embeddings, vectors(), &config()).unwrap()
}

#[test]
fn test_search_returns_ranked_matches() {
    let pipeline = pipeline();

    let outcome = pipeline.search("Rust", &FilterSelection::any());

    match outcome {
        SearchOutcome::Matches { matches } => {
            assert_eq!(matches.len(), 3);
            // The engineering postings win, best first.
            assert_eq!(matches[0].posting.corpus_index, 0);
            assert_eq!(matches[1].posting.corpus_index, 1);
            assert_eq!(matches[2].posting.corpus_index, 2);
            assert_eq!(matches[0].rank, 1);
            assert_eq!(matches[2].rank, 3);
            assert!(matches[0].score >= matches[1].score);
            assert!(matches[1].score >= matches[2].score);
            assert!(matches.iter().all(|m| m.score >= 0.6));
        }
        other => panic!("expected matches, got {:?}", other),
    }
}

#[test]
fn test_search_empty_query() {
    let pipeline = pipeline();

    let outcome = pipeline.search("  \n ", &FilterSelection::any());

    assert!(matches!(outcome, SearchOutcome::EmptyQuery));
}

#[test]
fn test_search_too_many_filters() {
    let pipeline = pipeline();
    let mut filters = FilterSelection::any();
    filters.state = FilterValue::Exact("California".to_string());

    let outcome = pipeline.search("rust developer", &filters);

    assert!(matches!(
        outcome,
        SearchOutcome::InsufficientCandidates {
            found: 2,
            required: 3
        }
    ));
}

#[test]
fn test_search_mixed_corpus_is_low_confidence() {
    // With only three Texas postings eligible, the nursing rows land in the
    // top 3 of an engineering query and drag the set below the threshold.
    let pipeline = pipeline();
    let mut filters = FilterSelection::any();
    filters.state = FilterValue::Exact("Texas".to_string());

    let outcome = pipeline.search("rust backend developer", &filters);

    assert!(matches!(outcome, SearchOutcome::LowConfidence { .. }));
}

#[test]
fn test_search_out_of_vocabulary_query_is_low_confidence() {
    let pipeline = pipeline();

    let outcome = pipeline.search("qwertyuiop asdfgh", &FilterSelection::any());

    assert!(matches!(outcome, SearchOutcome::LowConfidence { .. }));
}

#[test]
fn test_loaded_corpus_drives_pipeline_end_to_end() {
    let mut corpus_file = NamedTempFile::new().unwrap();
    corpus_file
        .write_all(
            br#"[
        {"state": "texas", "city": "austin", "job_type": "Full-Time",
         "sponsor_type": "Sponsored", "application_type": "Online",
         "posting_url": "https://jobs.example.com/a"},
        {"state": "No Info", "city": "", "job_type": "Full-Time",
         "sponsor_type": "Sponsored", "application_type": "Online",
         "posting_url": "https://jobs.example.com/b"},
        {"state": "texas", "city": "dallas", "job_type": "Full-Time",
         "sponsor_type": "Sponsored", "application_type": "Online",
         "posting_url": "https://jobs.example.com/c"},
        {"state": "texas", "city": "houston", "job_type": "Full-Time",
         "sponsor_type": "Sponsored", "application_type": "Online",
         "posting_url": "https://jobs.example.com/d"}
    ]"#,
        )
        .unwrap();

    let mut embeddings_file = NamedTempFile::new().unwrap();
    embeddings_file
        .write_all(b"[[1.0, 0.0, 0.0], [9.0, 9.0, 9.0], [0.9, 0.1, 0.0], [0.8, 0.2, 0.0]]")
        .unwrap();

    let mut vectors_file = NamedTempFile::new().unwrap();
    vectors_file
        .write_all(br#"{"rust": [1.0, 0.0, 0.0], "developer": [0.9, 0.1, 0.0]}"#)
        .unwrap();

    let table = load_word_vectors(vectors_file.path(), 3).unwrap();
    let loaded = load_corpus(corpus_file.path(), embeddings_file.path(), 3).unwrap();
    assert_eq!(loaded.postings.len(), 3);

    let pipeline =
        MatchingPipeline::new(loaded.postings, loaded.embeddings, table, &config()).unwrap();

    let outcome = pipeline.search("rust developer", &FilterSelection::any());

    match outcome {
        SearchOutcome::Matches { matches } => {
            assert_eq!(matches.len(), 3);
            assert_eq!(matches[0].posting.posting_url, "https://jobs.example.com/a");
            assert_eq!(matches[0].posting.state, "Texas");
        }
        other => panic!("expected matches, got {:?}", other),
    }
}
