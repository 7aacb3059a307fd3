//! Error types for termrank
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! defaults to [`TermError`]. Validation failures are reported at the earliest
//! stage so that no scorer ever runs on partial data.

use std::path::{Path, PathBuf};

/// Result alias used throughout the crate.
pub type Result<T, E = TermError> = std::result::Result<T, E>;

/// Errors raised while loading inputs, configuring or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// A required input file or directory does not exist.
    #[error("missing required input: {}", path.display())]
    MissingInput { path: PathBuf },

    /// The term-document matrix or candidate set has no usable terms.
    #[error("empty vocabulary: {0}")]
    EmptyVocabulary(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chunk rule could not be parsed.
    #[error("invalid grammar rule: {0}")]
    InvalidGrammar(String),

    /// A pre-tagged corpus is structurally malformed.
    #[error("invalid tagged input: {0}")]
    InvalidTaggedInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl TermError {
    pub fn missing_input(path: impl AsRef<Path>) -> Self {
        TermError::MissingInput {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn empty_vocabulary(msg: impl Into<String>) -> Self {
        TermError::EmptyVocabulary(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        TermError::InvalidConfig(msg.into())
    }

    pub fn invalid_grammar(msg: impl Into<String>) -> Self {
        TermError::InvalidGrammar(msg.into())
    }

    /// Whether this error came from input validation rather than computation.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TermError::MissingInput { .. } | TermError::InvalidTaggedInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_path() {
        let err = TermError::missing_input("corpus_completo_procesado.txt");
        assert_eq!(
            err.to_string(),
            "missing required input: corpus_completo_procesado.txt"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_empty_vocabulary_message() {
        let err = TermError::empty_vocabulary("no terms matched any document");
        assert!(err.to_string().contains("no terms matched"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(TermError::Io(_))));
    }
}
