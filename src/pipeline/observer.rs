//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. [`NoopObserver`] costs nothing; [`TracingObserver`] emits one
//! structured `tracing` event per stage; [`StageTimingObserver`] records
//! timings for inspection after the run.

use crate::types::{CandidateSet, TermCount};
use std::time::{Duration, Instant};

pub const STAGE_CHUNK: &str = "chunk";
pub const STAGE_COLLECT: &str = "collect";
pub const STAGE_COUNT: &str = "count";
pub const STAGE_FILTER: &str = "filter";

// ============================================================================
// Stage timing
// ============================================================================

/// Wall-clock timer started at a stage boundary
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a finished stage reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    elapsed: Duration,
    items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    /// Attach the number of items the stage produced
    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn items(&self) -> Option<usize> {
        self.items
    }
}

// ============================================================================
// Observer trait
// ============================================================================

/// Callbacks at each stage boundary. All methods default to no-ops.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once the candidate set is fixed
    fn on_candidates(&mut self, _candidates: &CandidateSet) {}

    /// Called with the full census, before filtering
    fn on_counts(&mut self, _counts: &[TermCount]) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Emits a `tracing` event at the end of each stage
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::info!(
            stage,
            elapsed_ms = report.elapsed().as_secs_f64() * 1000.0,
            items = ?report.items(),
            "stage finished"
        );
    }

    fn on_candidates(&mut self, candidates: &CandidateSet) {
        tracing::debug!(candidates = candidates.len(), "candidate set fixed");
    }
}

/// Collects `(stage, report)` pairs in execution order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Names of the stages seen so far
    pub fn stages(&self) -> Vec<&'static str> {
        self.reports.iter().map(|(s, _)| *s).collect()
    }

    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
