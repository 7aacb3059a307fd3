//! Corpus statistics
//!
//! Token and word counts, type-token ratio and lexical density over a tagged
//! corpus, plus the Markdown table comparing the original corpus with its
//! normalized counterpart.

use crate::errors::Result;
use crate::types::TaggedSentence;
use rustc_hash::FxHashSet;
use std::io::Write;

/// Aggregate counts for one corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Every token, punctuation included
    pub tokens: usize,
    /// Purely alphabetic tokens
    pub words: usize,
    /// Distinct word forms (case-sensitive)
    pub types: usize,
    /// Words tagged noun, adjective, verb or adverb
    pub lexical_words: usize,
}

fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

impl CorpusStats {
    pub fn from_sentences(sentences: &[TaggedSentence]) -> Self {
        let mut stats = CorpusStats::default();
        let mut types: FxHashSet<&str> = FxHashSet::default();

        for token in sentences.iter().flat_map(|s| s.tokens.iter()) {
            stats.tokens += 1;
            if is_alpha(&token.text) {
                stats.words += 1;
                types.insert(token.text.as_str());
            }
            if token.pos.is_lexical() {
                stats.lexical_words += 1;
            }
        }

        stats.types = types.len();
        stats
    }

    /// Type-token ratio as a percentage of words
    pub fn ttr_pct(&self) -> f64 {
        percent(self.types, self.words)
    }

    /// Lexical words as a percentage of words
    pub fn lexical_density_pct(&self) -> f64 {
        percent(self.lexical_words, self.words)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render the original-vs-processed comparison table
pub fn write_stats_markdown<W: Write + ?Sized>(
    writer: &mut W,
    original: &CorpusStats,
    processed: &CorpusStats,
) -> Result<()> {
    writeln!(writer, "# 📊 Comparación Estadística del Corpus (Texto Completo)")?;
    writeln!(writer)?;
    writeln!(writer, "| Métrica                 | Corpus Original | Corpus Procesado |")?;
    writeln!(writer, "|-------------------------|----------------|------------------|")?;
    writeln!(
        writer,
        "| **Tokens totales**      | {} | {} |",
        group_thousands(original.tokens),
        group_thousands(processed.tokens)
    )?;
    writeln!(
        writer,
        "| **Palabras totales**    | {} | {} |",
        group_thousands(original.words),
        group_thousands(processed.words)
    )?;
    writeln!(
        writer,
        "| **TTR (%)**             | {:.2}% | {:.2}% |",
        original.ttr_pct(),
        processed.ttr_pct()
    )?;
    writeln!(
        writer,
        "| **Densidad Léxica (%)** | {:.2}% | {:.2}% |",
        original.lexical_density_pct(),
        processed.lexical_density_pct()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence() -> TaggedSentence {
        TaggedSentence::from_pairs(&[
            ("Deep", "ADJ"),
            ("learning", "NOUN"),
            ("beats", "VERB"),
            ("deep", "ADJ"),
            ("learning", "NOUN"),
            ("in", "ADP"),
            ("Paris", "PROPN"),
            ("2024", "NUM"),
            (".", "PUNCT"),
        ])
    }

    #[test]
    fn test_counts() {
        let stats = CorpusStats::from_sentences(&[sentence()]);
        assert_eq!(stats.tokens, 9);
        assert_eq!(stats.words, 7);
        // Deep, learning, beats, deep, in, Paris
        assert_eq!(stats.types, 6);
        assert_eq!(stats.lexical_words, 5);
    }

    #[test]
    fn test_percentages() {
        let stats = CorpusStats {
            tokens: 10,
            words: 8,
            types: 6,
            lexical_words: 2,
        };
        assert!((stats.ttr_pct() - 75.0).abs() < 1e-12);
        assert!((stats.lexical_density_pct() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_corpus_is_zero() {
        let stats = CorpusStats::from_sentences(&[]);
        assert_eq!(stats, CorpusStats::default());
        assert_eq!(stats.ttr_pct(), 0.0);
        assert_eq!(stats.lexical_density_pct(), 0.0);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_markdown_table() {
        let original = CorpusStats {
            tokens: 12345,
            words: 10000,
            types: 2500,
            lexical_words: 5000,
        };
        let processed = CorpusStats {
            tokens: 800,
            words: 800,
            types: 400,
            lexical_words: 600,
        };
        let mut buf = Vec::new();
        write_stats_markdown(&mut buf, &original, &processed).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| **Tokens totales**      | 12,345 | 800 |"));
        assert!(text.contains("| **TTR (%)**             | 25.00% | 50.00% |"));
        assert!(text.contains("| **Densidad Léxica (%)** | 50.00% | 75.00% |"));
        assert_eq!(text.lines().count(), 8);
    }
}
