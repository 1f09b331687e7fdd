//! Job posting records and per-query filter selections

use serde::{Deserialize, Serialize};

/// One row of the job corpus. Loaded once at startup and never mutated;
/// `corpus_index` ties the posting to its row in the precomputed embedding
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub state: String,
    pub city: String,
    pub job_type: String,
    pub sponsor_type: String,
    pub application_type: String,
    pub posting_url: String,
    #[serde(default)]
    pub corpus_index: usize,
}

/// A single categorical choice: either the "Any" wildcard or an exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    Any,
    Exact(String),
}

impl FilterValue {
    /// Parse a CLI/UI selection; "Any" (case-insensitive) is the wildcard.
    pub fn parse(selection: &str) -> Self {
        if selection.eq_ignore_ascii_case("any") {
            FilterValue::Any
        } else {
            FilterValue::Exact(selection.to_string())
        }
    }

    pub fn matches(&self, attribute: &str) -> bool {
        match self {
            FilterValue::Any => true,
            FilterValue::Exact(value) => value == attribute,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }
}

impl From<Option<String>> for FilterValue {
    fn from(selection: Option<String>) -> Self {
        match selection {
            Some(value) => FilterValue::parse(&value),
            None => FilterValue::Any,
        }
    }
}

/// The five categorical choices of one query. Constructed fresh per search,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSelection {
    pub state: FilterValue,
    pub city: FilterValue,
    pub job_type: FilterValue,
    pub sponsor_type: FilterValue,
    pub application_type: FilterValue,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::any()
    }
}

impl FilterSelection {
    /// A selection that matches every posting.
    pub fn any() -> Self {
        Self {
            state: FilterValue::Any,
            city: FilterValue::Any,
            job_type: FilterValue::Any,
            sponsor_type: FilterValue::Any,
            application_type: FilterValue::Any,
        }
    }
}
