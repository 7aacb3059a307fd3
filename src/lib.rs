//! # termrank
//!
//! Multi-word terminology extraction and ranking.
//!
//! A shallow part-of-speech grammar finds candidate phrases in an
//! annotator-tagged corpus. Each candidate is then counted against the whole
//! processed corpus, filtered by frequency, and ranked by TTF-IDF (corpus-level
//! frequency weighted by smoothed IDF) or by C-Value (frequency corrected for
//! nesting inside longer candidates).
//!
//! ```
//! use termrank::{CValueScorer, ExtractionConfig, TaggedSentence, TermPipeline};
//!
//! let sentences = vec![TaggedSentence::from_pairs(&[
//!     ("machine", "NN"),
//!     ("learning", "NN"),
//!     ("algorithm", "NN"),
//! ])];
//! let corpus = "machine learning algorithm. machine learning algorithm. machine learning algorithm.";
//!
//! let pipeline = TermPipeline::from_config(ExtractionConfig::default()).unwrap();
//! let extraction = pipeline.extract(&sentences, corpus).unwrap();
//! assert_eq!(extraction.filtered[0].term, "machine learning algorithm");
//!
//! let ranking = CValueScorer::new().score(&extraction.filtered);
//! assert!(ranking[0].c_value > 0.0);
//! ```

pub mod corpus;
pub mod errors;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use corpus::{LexiconTagger, Tagger};
pub use errors::{Result, TermError};
pub use phrase::chunker::GrammarChunker;
pub use phrase::filter::FrequencyFilter;
pub use phrase::grammar::{ChunkRule, Grammar};
pub use pipeline::{Extraction, PipelineObserver, TermPipeline};
pub use scoring::{
    CValueRecord, CValueScorer, Document, TfIdfRanking, TfIdfRecord, TfIdfScorer, TtfIdfRecord,
    TtfIdfScorer, Vocabulary,
};
pub use types::{
    CandidateSet, ChunkSpan, ExtractionConfig, PosTag, TaggedSentence, TaggedToken, TermCount,
};
