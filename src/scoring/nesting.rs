//! Nested-term relation
//!
//! A candidate is nested in another when its word sequence occurs as a
//! contiguous run of the other's words. Containment is checked on word
//! tokens, never on raw characters, so "learning" is not nested in
//! "unlearning process". Equal-length phrases are never nested.

use rayon::prelude::*;

/// `true` iff `shorter` is a strict contiguous word-subsequence of `longer`
pub fn is_nested_in(shorter: &[&str], longer: &[&str]) -> bool {
    !shorter.is_empty()
        && shorter.len() < longer.len()
        && longer.windows(shorter.len()).any(|w| w == shorter)
}

/// For each candidate, the indices of the candidates that contain it.
///
/// Built fresh for every scoring pass; the relation is ordered by length so
/// it cannot contain cycles.
#[derive(Debug, Clone, Default)]
pub struct NestingIndex {
    containers: Vec<Vec<usize>>,
}

impl NestingIndex {
    pub fn build(terms: &[Vec<&str>]) -> Self {
        let containers = terms
            .par_iter()
            .map(|inner| {
                terms
                    .iter()
                    .enumerate()
                    .filter(|(_, outer)| is_nested_in(inner, outer))
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        Self { containers }
    }

    /// Indices of candidates strictly containing candidate `i`
    pub fn containers_of(&self, i: usize) -> &[usize] {
        self.containers.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
