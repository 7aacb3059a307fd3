//! TTF-IDF and per-document TF-IDF
//!
//! Documents are lower-cased and split into word tokens of two or more word
//! characters. Every n-gram whose length lies in the vocabulary's range is
//! looked up in the vocabulary and counted, giving a document × term count
//! matrix. From that matrix:
//!
//! - `TTF(t)` is the column sum
//! - `df(t)` is the number of documents with a non-zero count
//! - `IDF(t) = ln((N + 1) / (df(t) + 1)) + 1`
//! - `TTF-IDF(t) = TTF(t) * IDF(t)`
//! - presence = `df(t) / N * 100`
//!
//! `N` is supplied by the caller. Whole-corpus scoring passes a single
//! document holding the merged corpus.

use crate::errors::{Result, TermError};
use crate::scoring::sort_descending_by;
use crate::types::CandidateSet;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Word tokens of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// One input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Treat a whole merged corpus as a single document
    pub fn whole_corpus(text: impl Into<String>) -> Self {
        Self::new("corpus", text)
    }
}

// ============================================================================
// Vocabulary
// ============================================================================

/// Fixed term vocabulary restricted to an n-gram range
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: FxHashMap<String, usize>,
    ngram_range: (usize, usize),
}

impl Vocabulary {
    /// Normalize and deduplicate `terms`, keeping those whose word count lies
    /// within `ngram_range` (inclusive). First occurrence wins.
    pub fn new<I, S>(terms: I, ngram_range: (usize, usize)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (lo, hi) = ngram_range;
        let mut vocab = Vocabulary {
            terms: Vec::new(),
            index: FxHashMap::default(),
            ngram_range,
        };
        for term in terms {
            let term = CandidateSet::normalize(term.as_ref());
            let len = term.split_whitespace().count();
            if len < lo || len > hi || vocab.index.contains_key(&term) {
                continue;
            }
            vocab.index.insert(term.clone(), vocab.terms.len());
            vocab.terms.push(term);
        }
        vocab
    }

    pub fn from_candidates(candidates: &CandidateSet, ngram_range: (usize, usize)) -> Self {
        Self::new(candidates.iter(), ngram_range)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

// ============================================================================
// Term-document matrix
// ============================================================================

/// Dense document × term count matrix
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    /// One row per document, one column per vocabulary term
    rows: Vec<Vec<usize>>,
    num_terms: usize,
}

impl TermDocumentMatrix {
    pub fn build(vocab: &Vocabulary, documents: &[Document]) -> Result<Self> {
        let tokenizer = Regex::new(TOKEN_PATTERN)?;
        let (lo, hi) = vocab.ngram_range();

        let rows = documents
            .par_iter()
            .map(|doc| {
                let lowered = doc.text.to_lowercase();
                let tokens: Vec<&str> = tokenizer.find_iter(&lowered).map(|m| m.as_str()).collect();
                let mut row = vec![0usize; vocab.len()];
                for n in lo.max(1)..=hi {
                    for gram in tokens.windows(n) {
                        if let Some(col) = vocab.get(&gram.join(" ")) {
                            row[col] += 1;
                        }
                    }
                }
                row
            })
            .collect();

        Ok(Self {
            rows,
            num_terms: vocab.len(),
        })
    }

    pub fn num_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// Count of `term` in `doc`; `None` when either index is out of range
    pub fn count(&self, doc: usize, term: usize) -> Option<usize> {
        self.rows.get(doc)?.get(term).copied()
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Total term frequency per column
    pub fn ttf(&self) -> Vec<usize> {
        (0..self.num_terms)
            .map(|t| self.rows.iter().map(|r| r[t]).sum())
            .collect()
    }

    /// Number of documents containing each term
    pub fn document_frequency(&self) -> Vec<usize> {
        (0..self.num_terms)
            .map(|t| self.rows.iter().filter(|r| r[t] > 0).count())
            .collect()
    }

    /// Sum of every cell
    pub fn total(&self) -> usize {
        self.rows.iter().flatten().sum()
    }
}

/// Laplace-smoothed IDF; strictly positive whenever `df <= n`
pub fn smoothed_idf(df: usize, n: usize) -> f64 {
    ((n as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// Reject degenerate inputs before any counting happens
fn check_inputs(vocab: &Vocabulary, documents: &[Document], total_documents: usize) -> Result<()> {
    if documents.is_empty() {
        return Err(TermError::empty_vocabulary("no documents to score"));
    }
    if vocab.is_empty() {
        let (lo, hi) = vocab.ngram_range();
        return Err(TermError::empty_vocabulary(format!(
            "no candidate terms with {lo} to {hi} words"
        )));
    }
    if total_documents < documents.len() {
        return Err(TermError::invalid_config(format!(
            "total_documents ({total_documents}) is smaller than the {} documents supplied",
            documents.len()
        )));
    }
    Ok(())
}

fn build_matrix(vocab: &Vocabulary, documents: &[Document]) -> Result<TermDocumentMatrix> {
    let matrix = TermDocumentMatrix::build(vocab, documents)?;
    if matrix.total() == 0 {
        return Err(TermError::empty_vocabulary("no terms matched any document"));
    }
    tracing::debug!(
        documents = matrix.num_documents(),
        terms = matrix.num_terms(),
        "built term-document matrix"
    );
    Ok(matrix)
}

// ============================================================================
// TTF-IDF
// ============================================================================

/// One row of the TTF-IDF ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtfIdfRecord {
    pub term: String,
    pub ttf: usize,
    pub idf: f64,
    pub ttf_idf: f64,
    /// Percentage of documents containing the term
    pub presence_pct: f64,
}

/// Corpus-level TTF-IDF scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TtfIdfScorer;

impl TtfIdfScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `vocab` over `documents`, with `total_documents` as `N`.
    ///
    /// Sorted by TTF-IDF descending; ties keep vocabulary order.
    pub fn score(
        &self,
        vocab: &Vocabulary,
        documents: &[Document],
        total_documents: usize,
    ) -> Result<Vec<TtfIdfRecord>> {
        check_inputs(vocab, documents, total_documents)?;
        let matrix = build_matrix(vocab, documents)?;

        let ttf = matrix.ttf();
        let df = matrix.document_frequency();
        let n = total_documents;

        let mut records: Vec<TtfIdfRecord> = vocab
            .terms()
            .par_iter()
            .enumerate()
            .map(|(t, term)| {
                let idf = smoothed_idf(df[t], n);
                TtfIdfRecord {
                    term: term.clone(),
                    ttf: ttf[t],
                    idf,
                    ttf_idf: ttf[t] as f64 * idf,
                    presence_pct: df[t] as f64 / n as f64 * 100.0,
                }
            })
            .collect();

        sort_descending_by(&mut records, |r| r.ttf_idf);
        Ok(records)
    }
}

// ============================================================================
// Per-document TF-IDF (mean / max views)
// ============================================================================

/// Aggregated per-document TF-IDF weight of one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfRecord {
    pub term: String,
    pub mean: f64,
    pub max: f64,
}

/// Two rankings computed from the same weight matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfRanking {
    pub by_mean: Vec<TfIdfRecord>,
    pub by_max: Vec<TfIdfRecord>,
}

/// Per-document TF-IDF scorer.
///
/// Weights are `count * idf`, L2-normalized per document. The mean is taken
/// over all `N` documents (documents without matches contribute zeros).
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        vocab: &Vocabulary,
        documents: &[Document],
        total_documents: usize,
    ) -> Result<TfIdfRanking> {
        check_inputs(vocab, documents, total_documents)?;
        let matrix = build_matrix(vocab, documents)?;

        let idf: Vec<f64> = matrix
            .document_frequency()
            .into_iter()
            .map(|df| smoothed_idf(df, total_documents))
            .collect();

        let weights: Vec<Vec<f64>> = matrix
            .rows()
            .par_iter()
            .map(|row| {
                let mut w: Vec<f64> = row
                    .iter()
                    .zip(&idf)
                    .map(|(&count, &term_idf)| count as f64 * term_idf)
                    .collect();
                let norm = w.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    w.iter_mut().for_each(|x| *x /= norm);
                }
                w
            })
            .collect();

        let n = total_documents as f64;
        let records: Vec<TfIdfRecord> = vocab
            .terms()
            .iter()
            .enumerate()
            .map(|(t, term)| {
                let column = weights.iter().map(|w| w[t]);
                TfIdfRecord {
                    term: term.clone(),
                    mean: column.clone().sum::<f64>() / n,
                    max: column.fold(0.0, f64::max),
                }
            })
            .collect();

        let mut by_mean = records.clone();
        sort_descending_by(&mut by_mean, |r| r.mean);
        let mut by_max = records;
        sort_descending_by(&mut by_max, |r| r.max);

        Ok(TfIdfRanking { by_mean, by_max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("a.txt", "machine learning model uses machine learning data"),
            Document::new("b.txt", "deep learning model and machine learning"),
            Document::new("c.txt", "statistics without any matching phrase"),
        ]
    }

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            ["machine learning", "deep learning", "learning model", "statistics"],
            (2, 3),
        )
    }

    #[test]
    fn test_vocabulary_restricts_ngram_range() {
        let v = Vocabulary::new(
            ["Machine Learning", "statistics", "a b c d", "machine learning"],
            (2, 3),
        );
        assert_eq!(v.terms(), &["machine learning".to_string()]);
    }

    #[test]
    fn test_matrix_counts_overlapping_ngrams() {
        let v = Vocabulary::new(["machine learning", "learning model"], (2, 3));
        let m = TermDocumentMatrix::build(&v, &[Document::new("d", "Machine learning model")])
            .unwrap();
        assert_eq!(m.count(0, 0), Some(1));
        assert_eq!(m.count(0, 1), Some(1));
        assert_eq!(m.count(0, 2), None);
        assert_eq!(m.count(1, 0), None);
    }

    #[test]
    fn test_single_character_tokens_are_skipped() {
        let v = Vocabulary::new(["vitamin c", "vitamin intake"], (2, 3));
        let m = TermDocumentMatrix::build(&v, &[Document::new("d", "vitamin c intake")]).unwrap();
        assert_eq!(m.count(0, 0), Some(0));
        assert_eq!(m.count(0, 1), Some(1));
    }

    #[test]
    fn test_idf_positive() {
        for n in 0..20 {
            for df in 0..=n {
                assert!(smoothed_idf(df, n) > 0.0);
            }
        }
        assert!((smoothed_idf(0, 0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_ttf_idf_values() {
        let records = TtfIdfScorer::new().score(&vocab(), &docs(), 3).unwrap();
        assert_eq!(records.len(), 3);

        let ml = records.iter().find(|r| r.term == "machine learning").unwrap();
        assert_eq!(ml.ttf, 3);
        let idf = (4.0f64 / 3.0).ln() + 1.0;
        assert!((ml.idf - idf).abs() < 1e-10);
        assert!((ml.ttf_idf - 3.0 * idf).abs() < 1e-10);
        assert!((ml.presence_pct - 200.0 / 3.0).abs() < 1e-10);

        assert_eq!(records[0].term, "machine learning");
    }

    #[test]
    fn test_ttf_idf_ordering() {
        let records = TtfIdfScorer::new().score(&vocab(), &docs(), 3).unwrap();
        let order: Vec<_> = records.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(order, vec!["machine learning", "learning model", "deep learning"]);
    }

    #[test]
    fn test_ttf_idf_ties_keep_vocabulary_order() {
        let v = Vocabulary::new(["beta gamma", "alpha delta"], (2, 3));
        let records = TtfIdfScorer::new()
            .score(&v, &[Document::new("d", "alpha delta beta gamma")], 1)
            .unwrap();
        assert_eq!(records[0].term, "beta gamma");
        assert_eq!(records[1].term, "alpha delta");
        assert_eq!(records[0].ttf_idf, records[1].ttf_idf);
    }

    #[test]
    fn test_whole_corpus_mode() {
        let corpus = Document::whole_corpus("machine learning and deep learning and machine learning");
        let records = TtfIdfScorer::new().score(&vocab(), &[corpus], 1).unwrap();
        let ml = records.iter().find(|r| r.term == "machine learning").unwrap();
        assert_eq!(ml.ttf, 2);
        assert!((ml.idf - 1.0).abs() < 1e-10);
        assert!((ml.presence_pct - 100.0).abs() < 1e-10);

        let lm = records.iter().find(|r| r.term == "learning model").unwrap();
        assert_eq!(lm.ttf, 0);
        assert!((lm.idf - (2f64.ln() + 1.0)).abs() < 1e-10);
    }

    #[test]
    fn test_explicit_total_documents() {
        let records = TtfIdfScorer::new().score(&vocab(), &docs()[..1], 10).unwrap();
        let ml = records.iter().find(|r| r.term == "machine learning").unwrap();
        assert!((ml.presence_pct - 10.0).abs() < 1e-10);
        assert!(TtfIdfScorer::new().score(&vocab(), &docs(), 2).is_err());
    }

    #[test]
    fn test_empty_inputs_fail_fast() {
        let scorer = TtfIdfScorer::new();
        assert!(matches!(
            scorer.score(&vocab(), &[], 0),
            Err(TermError::EmptyVocabulary(_))
        ));
        let empty = Vocabulary::new(Vec::<String>::new(), (2, 3));
        assert!(matches!(
            scorer.score(&empty, &docs(), 3),
            Err(TermError::EmptyVocabulary(_))
        ));
        let unmatched = Vocabulary::new(["quantum chromodynamics"], (2, 3));
        assert!(matches!(
            scorer.score(&unmatched, &docs(), 3),
            Err(TermError::EmptyVocabulary(_))
        ));
    }

    #[test]
    fn test_tfidf_mean_and_max() {
        let ranking = TfIdfScorer::new().score(&vocab(), &docs(), 3).unwrap();
        assert_eq!(ranking.by_mean.len(), 3);
        assert_eq!(ranking.by_max.len(), 3);

        for r in &ranking.by_mean {
            assert!(r.max >= r.mean);
            assert!(r.max <= 1.0 + 1e-10);
        }
        // Means are sorted descending
        for pair in ranking.by_mean.windows(2) {
            assert!(pair[0].mean >= pair[1].mean);
        }
        for pair in ranking.by_max.windows(2) {
            assert!(pair[0].max >= pair[1].max);
        }
        assert_eq!(ranking.by_mean[0].term, "machine learning");
    }

    #[test]
    fn test_tfidf_single_term_document_normalizes_to_one() {
        let v = Vocabulary::new(["machine learning"], (2, 3));
        let ranking = TfIdfScorer::new()
            .score(&v, &[Document::new("d", "machine learning machine learning")], 1)
            .unwrap();
        assert!((ranking.by_max[0].max - 1.0).abs() < 1e-10);
        assert!((ranking.by_mean[0].mean - 1.0).abs() < 1e-10);
    }
}
