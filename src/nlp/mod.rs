//! Natural Language Processing components
//!
//! This module provides stopword filtering, text normalization and corpus
//! statistics.

pub mod normalize;
pub mod stats;
pub mod stopwords;
