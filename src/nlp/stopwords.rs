//! Stopword filtering
//!
//! Stopword lists come from the `stop-words` crate and can be extended per
//! run. A separate set of protected words is never treated as a stopword:
//! by default "of", which is part of prepositional terms such as
//! "analysis of variance".

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Case-insensitive stopword filter with protected words
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
    protected: FxHashSet<String>,
}

impl StopwordFilter {
    /// Built-in list for a language code; unknown codes fall back to English
    pub fn new(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "es" | "spanish" => LANGUAGE::Spanish,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };
        Self {
            stopwords: get(lang).iter().map(|s| s.to_lowercase()).collect(),
            protected: FxHashSet::default(),
        }
    }

    /// Filter built from an explicit word list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
            protected: FxHashSet::default(),
        }
    }

    /// Builder method: words that must survive filtering
    pub fn with_protected<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.protected
            .extend(words.iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Add more stopwords (e.g. a second list merged into the first)
    pub fn extend<S: AsRef<str>>(&mut self, words: &[S]) {
        self.stopwords
            .extend(words.iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        !self.protected.contains(&word) && self.stopwords.contains(&word)
    }

    /// Keep the tokens that are not stopwords, in order
    pub fn retain<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        tokens.into_iter().filter(|t| !self.is_stopword(t)).collect()
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list() {
        let filter = StopwordFilter::new("en");
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("algorithm"));
    }

    #[test]
    fn test_protected_words_survive() {
        let filter = StopwordFilter::new("en").with_protected(&["of"]);
        assert!(!filter.is_stopword("of"));
        assert_eq!(
            filter.retain("analysis of the variance".split(' ')),
            vec!["analysis", "of", "variance"]
        );
    }

    #[test]
    fn test_custom_list_and_extend() {
        let mut filter = StopwordFilter::from_list(&["foo"]);
        assert!(filter.is_stopword("FOO"));
        assert!(!filter.is_stopword("bar"));
        filter.extend(&["bar"]);
        assert!(filter.is_stopword("bar"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = StopwordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.retain(["a", "the"]), vec!["a", "the"]);
    }
}
