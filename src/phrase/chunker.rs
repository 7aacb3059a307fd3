//! Grammar-driven chunk detection
//!
//! Applies an ordered [`Grammar`] to each tagged sentence. Rules run as a
//! cascade: rule *k* only sees tokens that rules before it left unclaimed,
//! scanning left to right and resuming after each match. A match never
//! crosses an existing chunk, so spans never overlap.

use crate::phrase::grammar::Grammar;
use crate::types::{ChunkSpan, PosTag, TaggedSentence};
use rayon::prelude::*;

/// Configuration for chunk detection
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Minimum number of tokens in a reported chunk
    pub min_words: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { min_words: 2 }
    }
}

/// Grammar chunker
#[derive(Debug, Clone, Default)]
pub struct GrammarChunker {
    grammar: Grammar,
    config: ChunkerConfig,
}

impl GrammarChunker {
    /// Create a chunker with the default grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chunker for a custom grammar
    pub fn with_grammar(grammar: Grammar) -> Self {
        Self {
            grammar,
            config: ChunkerConfig::default(),
        }
    }

    /// Set minimum chunk length
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.config.min_words = min_words;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Extract non-overlapping chunks from a single sentence, ordered by start
    pub fn chunk_sentence(&self, sentence: &TaggedSentence) -> Vec<ChunkSpan> {
        let tags: Vec<PosTag> = sentence.tokens.iter().map(|t| t.pos).collect();
        let n = tags.len();
        let mut claimed = vec![false; n];
        let mut spans = Vec::new();

        for (rule_idx, rule) in self.grammar.rules().iter().enumerate() {
            let mut i = 0;
            while i < n {
                if claimed[i] {
                    i += 1;
                    continue;
                }

                // Free segment [i, seg_end)
                let seg_end = (i..n).find(|&j| claimed[j]).unwrap_or(n);
                let segment = &tags[..seg_end];

                let mut j = i;
                while j < seg_end {
                    match rule.match_at(segment, j) {
                        Some(end) if end > j => {
                            claimed[j..end].iter_mut().for_each(|c| *c = true);
                            spans.push(ChunkSpan::new(j, end, rule_idx));
                            j = end;
                        }
                        _ => j += 1,
                    }
                }
                i = seg_end;
            }
        }

        spans.sort_by_key(|s| s.start);
        spans.retain(|s| s.len() >= self.config.min_words);
        spans
    }

    /// Chunk every sentence and return the lower-cased phrases in discovery
    /// order (sentence order, then position within the sentence).
    pub fn chunk_corpus(&self, sentences: &[TaggedSentence]) -> Vec<String> {
        sentences
            .par_iter()
            .map(|sentence| {
                self.chunk_sentence(sentence)
                    .iter()
                    .map(|span| sentence.span_text(span))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}
