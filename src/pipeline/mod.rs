//! Extraction pipeline
//!
//! [`runner::TermPipeline`] composes the chunk, collect, count and filter
//! stages; [`observer`] provides the stage-boundary hooks used for logging
//! and timing.

pub mod observer;
pub mod runner;

pub use observer::{NoopObserver, PipelineObserver, StageTimingObserver, TracingObserver};
pub use runner::{Extraction, TermPipeline};
