//! C-Value termhood
//!
//! For a candidate `t` of `L` words with corpus count `f(t)`:
//!
//! ```text
//! S(t) = candidates strictly containing t
//! C(t) = log2(L) * f(t)                           if S(t) is empty
//! C(t) = log2(L) * (f(t) - sum(f(s)) / |S(t)|)    otherwise
//! ```
//!
//! Negative values are meaningful (the term mostly appears embedded in
//! longer terms) and are never clamped.

use crate::errors::{Result, TermError};
use crate::phrase::collector::count_terms;
use crate::scoring::nesting::NestingIndex;
use crate::scoring::sort_descending_by;
use crate::types::TermCount;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the C-Value ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CValueRecord {
    pub term: String,
    pub c_value: f64,
}

/// C-Value for a single candidate.
///
/// `nested_in` is `|S(t)|` and `container_freq` is the summed count of
/// those containers. `nested_in == 0` takes the no-nesting branch.
pub fn c_value(word_len: usize, count: usize, container_freq: usize, nested_in: usize) -> f64 {
    let weight = (word_len.max(1) as f64).log2();
    if nested_in == 0 {
        weight * count as f64
    } else {
        weight * (count as f64 - container_freq as f64 / nested_in as f64)
    }
}

/// C-Value scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct CValueScorer;

impl CValueScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score candidates with their whole-corpus counts.
    ///
    /// Output is sorted by C-Value descending; ties keep input order.
    pub fn score(&self, counts: &[TermCount]) -> Vec<CValueRecord> {
        let words: Vec<Vec<&str>> = counts
            .iter()
            .map(|c| c.term.split_whitespace().collect())
            .collect();
        let nesting = NestingIndex::build(&words);

        let mut records: Vec<CValueRecord> = counts
            .par_iter()
            .enumerate()
            .map(|(i, tc)| {
                let containers = nesting.containers_of(i);
                let container_freq: usize = containers.iter().map(|&j| counts[j].count).sum();
                CValueRecord {
                    term: tc.term.clone(),
                    c_value: c_value(words[i].len(), tc.count, container_freq, containers.len()),
                }
            })
            .collect();

        sort_descending_by(&mut records, |r| r.c_value);
        tracing::debug!(terms = records.len(), "scored c-value");
        records
    }

    /// Count `terms` against `corpus`, then score.
    ///
    /// Fails with `EmptyVocabulary` when there are no terms or the corpus
    /// holds no text.
    pub fn score_corpus<S>(&self, terms: &[S], corpus: &str) -> Result<Vec<CValueRecord>>
    where
        S: AsRef<str> + Sync,
    {
        if terms.iter().all(|t| t.as_ref().trim().is_empty()) {
            return Err(TermError::empty_vocabulary("no candidate terms to score"));
        }
        if corpus.trim().is_empty() {
            return Err(TermError::empty_vocabulary("corpus is empty"));
        }
        let counts = count_terms(terms, corpus)?;
        Ok(self.score(&counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "machine learning algorithm machine learning machine learning algorithm deep learning";

    fn lookup<'a>(records: &'a [CValueRecord], term: &str) -> &'a CValueRecord {
        records.iter().find(|r| r.term == term).unwrap()
    }

    #[test]
    fn test_nested_scenario() {
        let terms = [
            "machine learning",
            "learning algorithm",
            "machine learning algorithm",
            "deep learning",
        ];
        let records = CValueScorer::new().score_corpus(&terms[..], CORPUS).unwrap();

        // f = 3, S = {machine learning algorithm (f = 2)} → 1 * (3 - 2/1)
        let ml = lookup(&records, "machine learning");
        assert!((ml.c_value - 1.0).abs() < 1e-10);
        assert!(ml.c_value < 2f64.log2() * 3.0);

        let mla = lookup(&records, "machine learning algorithm");
        assert!((mla.c_value - 3f64.log2() * 2.0).abs() < 1e-10);

        let la = lookup(&records, "learning algorithm");
        assert!(la.c_value.abs() < 1e-10);

        assert_eq!(records[0].term, "machine learning algorithm");
    }

    #[test]
    fn test_no_nesting_reduction() {
        let counts = vec![TermCount::new("support vector machine", 4)];
        let records = CValueScorer::new().score(&counts);
        assert!((records[0].c_value - 3f64.log2() * 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_negative_values_not_clamped() {
        let counts = vec![
            TermCount::new("neural network", 1),
            TermCount::new("deep neural network", 5),
        ];
        let records = CValueScorer::new().score(&counts);
        let nn = lookup(&records, "neural network");
        assert!((nn.c_value - (1.0 - 5.0)).abs() < 1e-10);
        assert_eq!(records.last().unwrap().term, "neural network");
    }

    #[test]
    fn test_average_over_multiple_containers() {
        let counts = vec![
            TermCount::new("gradient descent", 10),
            TermCount::new("stochastic gradient descent", 4),
            TermCount::new("gradient descent method", 2),
        ];
        let records = CValueScorer::new().score(&counts);
        let gd = lookup(&records, "gradient descent");
        assert!((gd.c_value - (10.0 - 6.0 / 2.0)).abs() < 1e-10);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let counts = vec![
            TermCount::new("beta term", 3),
            TermCount::new("alpha term", 3),
        ];
        let records = CValueScorer::new().score(&counts);
        assert_eq!(records[0].term, "beta term");
        assert_eq!(records[1].term, "alpha term");
    }

    #[test]
    fn test_empty_term_list_rejected() {
        let err = CValueScorer::new()
            .score_corpus::<String>(&[], CORPUS)
            .unwrap_err();
        assert!(matches!(err, TermError::EmptyVocabulary(_)));

        let err = CValueScorer::new()
            .score_corpus(&["", "  "], CORPUS)
            .unwrap_err();
        assert!(matches!(err, TermError::EmptyVocabulary(_)));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let err = CValueScorer::new()
            .score_corpus(&["machine learning"], " \n ")
            .unwrap_err();
        assert!(matches!(err, TermError::EmptyVocabulary(_)));
    }

    #[test]
    fn test_single_word_weight_is_zero() {
        assert_eq!(c_value(1, 7, 0, 0), 0.0);
    }
}
