//! Core types for termrank
//!
//! This module defines the data structures shared by every stage: tagged
//! tokens and sentences, chunk spans, the candidate set, occurrence counts,
//! and the extraction configuration.

use crate::errors::{Result, TermError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Part of speech
// ============================================================================

/// Coarse part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Adjective,
    Preposition,
    Verb,
    Adverb,
    Determiner,
    Pronoun,
    Conjunction,
    Numeral,
    Particle,
    Interjection,
    Punctuation,
    Symbol,
    Other,
}

impl PosTag {
    /// Check if this tag represents a noun (common or proper)
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Check if this tag counts toward lexical density.
    ///
    /// Proper nouns are excluded.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Adjective | PosTag::Verb | PosTag::Adverb
        )
    }

    /// Parse a Universal Dependencies (spaCy `pos_`) tag
    pub fn from_spacy(tag: &str) -> Option<Self> {
        let pos = match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "ADJ" => PosTag::Adjective,
            "ADP" => PosTag::Preposition,
            "VERB" | "AUX" => PosTag::Verb,
            "ADV" => PosTag::Adverb,
            "DET" => PosTag::Determiner,
            "PRON" => PosTag::Pronoun,
            "CCONJ" | "SCONJ" | "CONJ" => PosTag::Conjunction,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "INTJ" => PosTag::Interjection,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            "X" => PosTag::Other,
            _ => return None,
        };
        Some(pos)
    }

    /// Parse a Penn Treebank tag (NLTK `pos_tag`, spaCy `tag_`)
    pub fn from_penn(tag: &str) -> Option<Self> {
        let tag = tag.to_uppercase();
        let pos = match tag.as_str() {
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::ProperNoun,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "IN" => PosTag::Preposition,
            "TO" | "RP" | "POS" => PosTag::Particle,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adverb,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PosTag::Pronoun,
            "CC" => PosTag::Conjunction,
            "CD" => PosTag::Numeral,
            "UH" => PosTag::Interjection,
            "SYM" | "$" | "#" => PosTag::Symbol,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "(" | ")" | "HYPH" | "NFP" => {
                PosTag::Punctuation
            }
            "FW" | "LS" | "XX" | "ADD" | "AFX" | "GW" => PosTag::Other,
            t if t.starts_with("VB") || t == "MD" => PosTag::Verb,
            _ => return None,
        };
        Some(pos)
    }

    /// Parse either tagset; Universal names take precedence.
    ///
    /// Unknown tags map to [`PosTag::Other`].
    pub fn parse(tag: &str) -> Self {
        Self::from_spacy(tag)
            .or_else(|| Self::from_penn(tag))
            .unwrap_or(PosTag::Other)
    }

    /// Universal tag string for this enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Adjective => "ADJ",
            PosTag::Preposition => "ADP",
            PosTag::Verb => "VERB",
            PosTag::Adverb => "ADV",
            PosTag::Determiner => "DET",
            PosTag::Pronoun => "PRON",
            PosTag::Conjunction => "CCONJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Interjection => "INTJ",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::Other => "X",
        }
    }
}

// ============================================================================
// Tagged tokens
// ============================================================================

/// A token as produced by the external annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface form
    pub text: String,
    /// Coarse part-of-speech tag
    pub pos: PosTag,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// A sentence-scoped run of tagged tokens. Chunking never crosses sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    pub tokens: Vec<TaggedToken>,
}

impl TaggedSentence {
    pub fn new(tokens: Vec<TaggedToken>) -> Self {
        Self { tokens }
    }

    /// Build a sentence from `(text, tag)` pairs, parsing each tag with [`PosTag::parse`]
    pub fn from_pairs<S: AsRef<str>, T: AsRef<str>>(pairs: &[(S, T)]) -> Self {
        Self {
            tokens: pairs
                .iter()
                .map(|(text, tag)| TaggedToken::new(text.as_ref(), PosTag::parse(tag.as_ref())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lower-cased, space-joined text of tokens `[start, end)`
    pub fn span_text(&self, span: &ChunkSpan) -> String {
        self.tokens[span.start..span.end]
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============================================================================
// Chunk span
// ============================================================================

/// A chunk matched inside a single sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    /// Start token index (inclusive)
    pub start: usize,
    /// End token index (exclusive)
    pub end: usize,
    /// Index of the grammar rule that produced this span
    pub rule: usize,
}

impl ChunkSpan {
    pub fn new(start: usize, end: usize, rule: usize) -> Self {
        Self { start, end, rule }
    }

    /// Check if this chunk shares any token with another
    pub fn overlaps(&self, other: &ChunkSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Token length of this chunk
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// ============================================================================
// Candidate set
// ============================================================================

/// Unique candidate phrases in discovery order.
///
/// Identity is the normalized (lower-cased, single-spaced) string. The
/// discovery index doubles as the tie-breaker for every ranked output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    phrases: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a phrase: lower-case and collapse whitespace
    pub fn normalize(phrase: &str) -> String {
        phrase
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Insert a phrase; returns `true` if it was not already present
    pub(crate) fn insert(&mut self, phrase: String) -> bool {
        if self.index.contains_key(&phrase) {
            return false;
        }
        self.index.insert(phrase.clone(), self.phrases.len());
        self.phrases.push(phrase);
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(phrase)
    }

    /// Discovery index of a phrase
    pub fn position(&self, phrase: &str) -> Option<usize> {
        self.index.get(phrase).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Whole-corpus occurrence count of one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

impl TermCount {
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }

    /// Number of whitespace-separated words in the term
    pub fn word_len(&self) -> usize {
        self.term.split_whitespace().count()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Default chunk rules, in priority order.
pub const DEFAULT_GRAMMAR: [&str; 4] = [
    "<JJ>*<NN.*><NN.*>+",
    "<JJ>*<NN.*><IN><NN.*>+",
    "<NN.*><NN.*>",
    "<NN.*><IN><NN.*>",
];

/// Configuration for term extraction and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Candidates are retained only when their count is strictly greater
    pub min_frequency: usize,
    /// Minimum number of words in a candidate phrase
    pub min_words: usize,
    /// Inclusive word-length range of the TTF-IDF vocabulary
    pub ngram_range: (usize, usize),
    /// Chunk rules, applied in order
    pub grammar: Vec<String>,
    /// Language code for stopwords (e.g., "en", "es")
    pub language: String,
    /// Words never removed as stopwords during normalization
    pub keep_words: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            min_words: 2,
            ngram_range: (2, 3),
            grammar: DEFAULT_GRAMMAR.iter().map(|r| r.to_string()).collect(),
            language: "en".to_string(),
            keep_words: vec!["of".to_string()],
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; absent fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TermError::missing_input(path));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_words < 2 {
            return Err(TermError::invalid_config(format!(
                "min_words must be >= 2, got {}",
                self.min_words
            )));
        }

        let (lo, hi) = self.ngram_range;
        if lo == 0 {
            return Err(TermError::invalid_config("ngram_range lower bound must be > 0"));
        }
        if hi < lo {
            return Err(TermError::invalid_config(format!(
                "ngram_range upper bound must be >= lower bound, got ({lo}, {hi})"
            )));
        }

        if self.grammar.is_empty() {
            return Err(TermError::invalid_config("grammar must contain at least one rule"));
        }

        Ok(())
    }

    /// Builder method: set minimum frequency
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Builder method: set minimum phrase word count
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Builder method: set the TTF-IDF n-gram range
    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min, max);
        self
    }

    /// Builder method: replace the chunk grammar
    pub fn with_grammar<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grammar = rules.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penn_tags() {
        assert_eq!(PosTag::from_penn("NN"), Some(PosTag::Noun));
        assert_eq!(PosTag::from_penn("nns"), Some(PosTag::Noun));
        assert_eq!(PosTag::from_penn("NNPS"), Some(PosTag::ProperNoun));
        assert_eq!(PosTag::from_penn("JJR"), Some(PosTag::Adjective));
        assert_eq!(PosTag::from_penn("IN"), Some(PosTag::Preposition));
        assert_eq!(PosTag::from_penn("VBZ"), Some(PosTag::Verb));
        assert_eq!(PosTag::from_penn("NOUN"), None);
    }

    #[test]
    fn test_parse_prefers_universal() {
        assert_eq!(PosTag::parse("NOUN"), PosTag::Noun);
        assert_eq!(PosTag::parse("ADP"), PosTag::Preposition);
        assert_eq!(PosTag::parse("NN"), PosTag::Noun);
        assert_eq!(PosTag::parse("???"), PosTag::Other);
    }

    #[test]
    fn test_lexical_tags() {
        assert!(PosTag::Noun.is_lexical());
        assert!(PosTag::Adverb.is_lexical());
        assert!(!PosTag::Preposition.is_lexical());
        assert!(!PosTag::Determiner.is_lexical());
        assert!(!PosTag::ProperNoun.is_lexical());
    }

    #[test]
    fn test_span_text_lowercases() {
        let sent = TaggedSentence::from_pairs(&[("Machine", "NN"), ("Learning", "NN")]);
        assert_eq!(sent.span_text(&ChunkSpan::new(0, 2, 0)), "machine learning");
    }

    #[test]
    fn test_chunk_overlap() {
        let a = ChunkSpan::new(0, 3, 0);
        let b = ChunkSpan::new(2, 5, 0);
        let c = ChunkSpan::new(3, 4, 1);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_candidate_set_keeps_discovery_order() {
        let mut set = CandidateSet::new();
        assert!(set.insert("deep learning".into()));
        assert!(set.insert("machine learning".into()));
        assert!(!set.insert("deep learning".into()));

        assert_eq!(set.len(), 2);
        assert_eq!(set.position("machine learning"), Some(1));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["deep learning", "machine learning"]
        );
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(CandidateSet::normalize("  Neural   Network "), "neural network");
    }

    #[test]
    fn test_config_validation() {
        assert!(ExtractionConfig::default().validate().is_ok());
        assert!(ExtractionConfig::default().with_min_words(1).validate().is_err());
        assert!(ExtractionConfig::default().with_ngram_range(3, 2).validate().is_err());
        assert!(ExtractionConfig::default().with_ngram_range(0, 2).validate().is_err());
        assert!(ExtractionConfig::default()
            .with_grammar(Vec::<String>::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serde_missing_fields_default() {
        let cfg: ExtractionConfig = serde_json::from_str(r#"{ "min_frequency": 5 }"#).unwrap();
        assert_eq!(cfg.min_frequency, 5);
        assert_eq!(cfg.ngram_range, (2, 3));
        assert_eq!(cfg.grammar.len(), 4);
        assert_eq!(cfg.keep_words, vec!["of".to_string()]);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let cfg = ExtractionConfig::default().with_ngram_range(2, 4);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ExtractionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
