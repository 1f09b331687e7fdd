//! Categorical pre-filtering of the posting set

use crate::corpus::posting::{FilterSelection, JobPosting};

/// Applies the conjunctive categorical filters of one query.
pub struct CategoricalFilter<'a> {
    selection: &'a FilterSelection,
}

impl<'a> CategoricalFilter<'a> {
    pub fn new(selection: &'a FilterSelection) -> Self {
        Self { selection }
    }

    /// Indices of the eligible postings, in original corpus order. The
    /// caller uses the same indices to slice the embedding matrix, keeping
    /// both sides aligned.
    ///
    /// City equality is required only when a concrete state was chosen:
    /// with state "Any" the city dimension is disabled regardless of its
    /// value. This mirrors the original product's state-then-city selection
    /// flow and is a deliberate policy, not an oversight.
    pub fn apply(&self, postings: &[JobPosting]) -> Vec<usize> {
        postings
            .iter()
            .enumerate()
            .filter(|(_, posting)| self.matches(posting))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches(&self, posting: &JobPosting) -> bool {
        let city_ok = self.selection.state.is_any() || self.selection.city.matches(&posting.city);

        self.selection.state.matches(&posting.state)
            && city_ok
            && self.selection.job_type.matches(&posting.job_type)
            && self.selection.sponsor_type.matches(&posting.sponsor_type)
            && self
                .selection
                .application_type
                .matches(&posting.application_type)
    }
}
