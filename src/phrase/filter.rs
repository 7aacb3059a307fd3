//! Minimum-frequency filter

use crate::types::TermCount;

/// Drops candidates at or below a frequency threshold
#[derive(Debug, Clone, Copy)]
pub struct FrequencyFilter {
    min_frequency: usize,
}

impl Default for FrequencyFilter {
    fn default() -> Self {
        Self { min_frequency: 2 }
    }
}

impl FrequencyFilter {
    pub fn new(min_frequency: usize) -> Self {
        Self { min_frequency }
    }

    pub fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    /// Keep rows with `count > min_frequency`, sorted by count descending.
    ///
    /// The sort is stable: equal counts keep their input (discovery) order.
    pub fn apply(&self, counts: Vec<TermCount>) -> Vec<TermCount> {
        let mut kept: Vec<TermCount> = counts
            .into_iter()
            .filter(|c| c.count > self.min_frequency)
            .collect();
        kept.sort_by(|a, b| b.count.cmp(&a.count));
        kept
    }
}
