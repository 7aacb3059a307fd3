//! Text normalization ahead of tagging
//!
//! Produces the cleaned text that the external annotator tags and that the
//! census counts against: lower-cased, stop-phrases removed, non-alphabetic
//! characters blanked, stopwords dropped, whitespace collapsed.
//! Lemmatization is left to the annotator.

use crate::errors::Result;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::ExtractionConfig;
use regex::RegexBuilder;

/// Collapse whitespace runs to a single space and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace everything except ASCII letters and whitespace with a space
pub fn remove_non_alphabetic(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Remove whole occurrences of each phrase, case-insensitively.
///
/// Longer phrases are removed first so that "in this paper we" goes before
/// "in this paper". A match only counts when it is not glued to a word
/// character on either side.
pub fn remove_phrases<S: AsRef<str>>(text: &str, phrases: &[S]) -> Result<String> {
    let mut ordered: Vec<&str> = phrases
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    ordered.dedup();

    let mut out = text.to_string();
    for phrase in ordered {
        let re = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()?;

        let mut result = String::with_capacity(out.len());
        let mut last = 0;
        let mut pos = 0;
        while let Some(m) = re.find_at(&out, pos) {
            let before = out[..m.start()].chars().next_back();
            let after = out[m.end()..].chars().next();
            if before.map_or(false, is_word_char) || after.map_or(false, is_word_char) {
                // Retry one character further on
                pos = m.start() + out[m.start()..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            result.push_str(&out[last..m.start()]);
            result.push(' ');
            last = m.end();
            pos = m.end();
        }
        result.push_str(&out[last..]);
        out = result;
    }

    Ok(normalize_whitespace(&out))
}

/// Full cleaning pass applied to each raw document
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: StopwordFilter,
    stop_phrases: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self {
            stopwords,
            stop_phrases: Vec::new(),
        }
    }

    /// Language stopwords plus the configured protected words
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let stopwords = StopwordFilter::new(&config.language).with_protected(&config.keep_words);
        Self::new(stopwords)
    }

    /// Builder method: phrases stripped before anything else (e.g. academic boilerplate)
    pub fn with_stop_phrases(mut self, phrases: Vec<String>) -> Self {
        self.stop_phrases = phrases.into_iter().map(|p| p.to_lowercase()).collect();
        self
    }

    pub fn normalize(&self, text: &str) -> Result<String> {
        let lowered = text.to_lowercase();
        let stripped = remove_phrases(&lowered, &self.stop_phrases)?;
        let alphabetic = remove_non_alphabetic(&stripped);
        let kept = self.stopwords.retain(alphabetic.split_whitespace());
        Ok(kept.join(" "))
    }
}
