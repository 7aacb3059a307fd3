//! Candidate collection and corpus census
//!
//! Grammar matches are only a discovery step. Once the candidate set is
//! fixed, every candidate is counted again against the full corpus text with
//! a literal, case-insensitive, word-boundary-anchored match, so a phrase the
//! grammar caught once but which appears five times reports 5.

use crate::errors::Result;
use crate::types::{CandidateSet, TermCount};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};

impl CandidateSet {
    /// Deduplicate phrases into a candidate set.
    ///
    /// Phrases are normalized first; phrases with fewer than `min_words`
    /// words are dropped. The first occurrence fixes the discovery order.
    pub fn from_phrases<I, S>(phrases: I, min_words: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CandidateSet::new();
        for phrase in phrases {
            let normalized = CandidateSet::normalize(phrase.as_ref());
            if normalized.split(' ').count() < min_words || normalized.is_empty() {
                continue;
            }
            set.insert(normalized);
        }
        set
    }
}

/// Build the census pattern for one candidate
pub fn census_pattern(term: &str) -> Result<Regex> {
    let pattern = format!(r"\b{}\b", regex::escape(term));
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// Count non-overlapping literal occurrences of `term` in `text`
pub fn count_term(term: &str, text: &str) -> Result<usize> {
    Ok(census_pattern(term)?.find_iter(text).count())
}

/// Count every candidate against the full corpus text.
///
/// Rows come back in discovery order regardless of how the parallel
/// reduction is scheduled.
pub fn count_occurrences(candidates: &CandidateSet, corpus: &str) -> Result<Vec<TermCount>> {
    count_terms(candidates.as_slice(), corpus)
}

/// Count an arbitrary term list (e.g. a curated vocabulary file).
pub fn count_terms<S>(terms: &[S], corpus: &str) -> Result<Vec<TermCount>>
where
    S: AsRef<str> + Sync,
{
    let lowered = corpus.to_lowercase();
    terms
        .par_iter()
        .map(|term| {
            let term = term.as_ref();
            Ok(TermCount::new(term, count_term(term, &lowered)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_single_word_exclusion() {
        let set = CandidateSet::from_phrases(
            ["machine learning", "learning", "Machine  Learning", "deep learning"],
            2,
        );
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["machine learning", "deep learning"]
        );
        assert!(set.iter().all(|p| p.split(' ').count() >= 2));
    }

    #[test]
    fn test_census_counts_beyond_grammar_hits() {
        let corpus = "Neural network. A neural network is a network; neural networks too. neural network";
        assert_eq!(count_term("neural network", corpus).unwrap(), 3);
    }

    #[test]
    fn test_census_respects_word_boundaries() {
        let corpus = "unmachine learning machine learningx machine learning";
        assert_eq!(count_term("machine learning", corpus).unwrap(), 1);
    }

    #[test]
    fn test_census_escapes_metacharacters() {
        let corpus = "c++ code and c code";
        assert_eq!(count_term("c code", corpus).unwrap(), 1);
        assert_eq!(count_term("a.b c", "axb c a.b c").unwrap(), 1);
    }

    #[test]
    fn test_count_occurrences_keeps_discovery_order() {
        let set = CandidateSet::from_phrases(["deep learning", "machine learning"], 2);
        let counts = count_occurrences(&set, "Machine Learning and deep learning; machine learning").unwrap();
        assert_eq!(
            counts,
            vec![
                TermCount::new("deep learning", 1),
                TermCount::new("machine learning", 2),
            ]
        );
    }
}
