//! Termhood scoring
//!
//! Two independent scorers consume the same candidate set and corpus:
//! - TTF-IDF: corpus-level term frequency weighted by smoothed IDF
//! - C-Value: frequency corrected for nesting inside longer candidates
//!
//! Both reduce per candidate in parallel and then sort with an explicit,
//! stable tie-break: rows with equal scores keep discovery order.

pub mod c_value;
pub mod nesting;
pub mod ttf_idf;

pub use c_value::{CValueRecord, CValueScorer};
pub use nesting::{is_nested_in, NestingIndex};
pub use ttf_idf::{
    smoothed_idf, Document, TermDocumentMatrix, TfIdfRanking, TfIdfRecord, TfIdfScorer,
    TtfIdfRecord, TtfIdfScorer, Vocabulary,
};

/// Stable descending sort on an `f64` key.
///
/// `slice::sort_by` is stable, so ties keep the order rows were produced in.
pub(crate) fn sort_descending_by<T>(rows: &mut [T], key: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
