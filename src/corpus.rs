//! Corpus inputs
//!
//! Loaders for the merged processed corpus, candidate term lists, per-document
//! text directories and pre-tagged corpora. Every loader checks that its input
//! exists before reading, so a missing file surfaces as
//! [`TermError::MissingInput`] rather than an I/O error halfway through a run.
//!
//! Tagging itself is external: an annotator produces the `[[token, tag], ...]`
//! JSON consumed by [`load_tagged_corpus`], or implements [`Tagger`].

use crate::errors::{Result, TermError};
use crate::scoring::Document;
use crate::types::{PosTag, TaggedSentence, TaggedToken};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::path::{Path, PathBuf};

fn require(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(TermError::missing_input(path))
    }
}

/// Read the merged corpus, lower-cased
pub fn load_corpus(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    require(path)?;
    Ok(fs::read_to_string(path)?.to_lowercase())
}

/// One phrase per line: trimmed, lower-cased, blank lines skipped.
///
/// Duplicates are dropped; the first occurrence keeps its position.
pub fn load_term_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    require(path)?;
    let text = fs::read_to_string(path)?;
    Ok(parse_term_list(&text))
}

/// Parse term-list text; also accepts the `term\tfrequency` rows written by
/// the extraction stage, keeping only the term column.
pub fn parse_term_list(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    text.lines()
        .filter_map(|line| line.split('\t').next())
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Every `.txt` file of a directory, in file-name order
pub fn load_documents(dir: impl AsRef<Path>) -> Result<Vec<Document>> {
    load_documents_excluding(dir, &[])
}

/// Like [`load_documents`], skipping any file that resolves to one of
/// `excluded` (a stop-list kept next to the texts, for instance)
pub fn load_documents_excluding(
    dir: impl AsRef<Path>,
    excluded: &[&Path],
) -> Result<Vec<Document>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(TermError::missing_input(dir));
    }
    let excluded: Vec<PathBuf> = excluded
        .iter()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }
        if !excluded.is_empty() && excluded.contains(&fs::canonicalize(&path)?) {
            tracing::debug!(path = %path.display(), "skipping excluded file");
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    if paths.is_empty() {
        return Err(TermError::empty_vocabulary(format!(
            "no .txt documents in {}",
            dir.display()
        )));
    }

    paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(Document::new(name, fs::read_to_string(&path)?))
        })
        .collect()
}

/// Concatenate documents, each followed by a newline
pub fn merge_documents(documents: &[Document]) -> String {
    let mut merged = String::with_capacity(documents.iter().map(|d| d.text.len() + 1).sum());
    for doc in documents {
        merged.push_str(&doc.text);
        merged.push('\n');
    }
    merged
}

// ============================================================================
// Tagged input
// ============================================================================

/// Read a pre-tagged corpus: a JSON array of sentences, each an array of
/// `[token, tag]` pairs. Tags may be Universal or Penn names.
pub fn load_tagged_corpus(path: impl AsRef<Path>) -> Result<Vec<TaggedSentence>> {
    let path = path.as_ref();
    require(path)?;
    let text = fs::read_to_string(path)?;
    parse_tagged_corpus(&text)
}

pub fn parse_tagged_corpus(json: &str) -> Result<Vec<TaggedSentence>> {
    let raw: Vec<Vec<(String, String)>> = serde_json::from_str(json).map_err(|e| {
        TermError::InvalidTaggedInput(format!(
            "expected [[[token, tag], ...], ...]: {}",
            e
        ))
    })?;

    Ok(raw
        .into_iter()
        .map(|pairs| TaggedSentence::from_pairs(&pairs[..]))
        .collect())
}

/// Seam for the external part-of-speech annotator
pub trait Tagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedSentence>>;
}

/// Dictionary-lookup tagger.
///
/// Sentences end at `.`, `!` or `?`; tokens are split on whitespace and
/// trailing punctuation. Words missing from the lexicon get the fallback tag.
/// Suited to tests and to corpora whose vocabulary was tagged offline.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: FxHashMap<String, PosTag>,
    fallback: PosTag,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self {
            lexicon: FxHashMap::default(),
            fallback: PosTag::Noun,
        }
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: tag used for words missing from the lexicon
    pub fn with_fallback(mut self, fallback: PosTag) -> Self {
        self.fallback = fallback;
        self
    }

    /// Builder method: tag every word in `words` as `pos`
    pub fn with_words(mut self, pos: PosTag, words: &[&str]) -> Self {
        for word in words {
            self.lexicon.insert(word.to_lowercase(), pos);
        }
        self
    }

    fn lookup(&self, word: &str) -> PosTag {
        self.lexicon
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedSentence>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() {
                current.push(TaggedToken::new(word, self.lookup(word)));
            }
            if raw.ends_with(['.', '!', '?']) && !current.is_empty() {
                sentences.push(TaggedSentence::new(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            sentences.push(TaggedSentence::new(current));
        }

        Ok(sentences)
    }
}
