//! Phrase extraction components
//!
//! This module provides the chunk grammar, grammar-driven chunk detection,
//! candidate collection with whole-corpus counting, and frequency filtering.

pub mod chunker;
pub mod collector;
pub mod filter;
pub mod grammar;
