//! Pipeline runner: chunk, collect, count and filter in order.
//!
//! [`TermPipeline::extract`] takes the annotator's tagged sentences plus the
//! processed corpus text and returns an [`Extraction`] holding every
//! intermediate product. Scorers run separately on that result, so a single
//! extraction can feed TTF-IDF and C-Value alike.
//!
//! Each stage runs inside a `pipeline_stage` tracing span and is reported to
//! a [`PipelineObserver`].

use crate::corpus::Tagger;
use crate::errors::Result;
use crate::phrase::chunker::GrammarChunker;
use crate::phrase::collector::count_occurrences;
use crate::phrase::filter::FrequencyFilter;
use crate::phrase::grammar::Grammar;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_CHUNK, STAGE_COLLECT,
    STAGE_COUNT, STAGE_FILTER,
};
use crate::types::{CandidateSet, ExtractionConfig, TaggedSentence, TermCount};

/// Enter a tracing span for a pipeline stage
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Everything the extraction stages produce
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Unique candidates in discovery order
    pub candidates: CandidateSet,
    /// Whole-corpus census, one row per candidate, discovery order
    pub counts: Vec<TermCount>,
    /// Rows above the frequency threshold, count descending
    pub filtered: Vec<TermCount>,
}

/// Candidate extraction pipeline
#[derive(Debug, Clone)]
pub struct TermPipeline {
    config: ExtractionConfig,
    chunker: GrammarChunker,
    filter: FrequencyFilter,
}

impl TermPipeline {
    /// Build the stages from a configuration, parsing its grammar
    pub fn from_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let grammar = Grammar::parse(&config.grammar[..])?;
        let chunker = GrammarChunker::with_grammar(grammar).with_min_words(config.min_words);
        let filter = FrequencyFilter::new(config.min_frequency);
        Ok(Self {
            config,
            chunker,
            filter,
        })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run extraction without an observer
    pub fn extract(&self, sentences: &[TaggedSentence], corpus: &str) -> Result<Extraction> {
        self.extract_with_observer(sentences, corpus, &mut NoopObserver)
    }

    /// Tag `text` with `tagger`, then extract with `text` itself as the corpus
    pub fn extract_text(&self, tagger: &impl Tagger, text: &str) -> Result<Extraction> {
        let sentences = tagger.tag(text)?;
        self.extract(&sentences, text)
    }

    /// Run extraction, notifying `observer` at each stage boundary.
    ///
    /// Stages:
    /// 1. Chunk every sentence with the grammar cascade
    /// 2. Collect unique candidates of at least `min_words` words
    /// 3. Count each candidate against the whole corpus
    /// 4. Keep candidates with `count > min_frequency`
    pub fn extract_with_observer(
        &self,
        sentences: &[TaggedSentence],
        corpus: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Extraction> {
        // Stage 1: Chunk
        let phrases = {
            trace_stage!(STAGE_CHUNK);
            observer.on_stage_start(STAGE_CHUNK);
            let clock = StageClock::start();
            let phrases = self.chunker.chunk_corpus(sentences);
            observer.on_stage_end(
                STAGE_CHUNK,
                &StageReport::new(clock.elapsed()).with_items(phrases.len()),
            );
            phrases
        };

        // Stage 2: Collect
        let candidates = {
            trace_stage!(STAGE_COLLECT);
            observer.on_stage_start(STAGE_COLLECT);
            let clock = StageClock::start();
            let candidates = CandidateSet::from_phrases(&phrases, self.config.min_words);
            observer.on_stage_end(
                STAGE_COLLECT,
                &StageReport::new(clock.elapsed()).with_items(candidates.len()),
            );
            observer.on_candidates(&candidates);
            candidates
        };

        // Stage 3: Count
        let counts = {
            trace_stage!(STAGE_COUNT);
            observer.on_stage_start(STAGE_COUNT);
            let clock = StageClock::start();
            let counts = count_occurrences(&candidates, corpus)?;
            observer.on_stage_end(
                STAGE_COUNT,
                &StageReport::new(clock.elapsed()).with_items(counts.len()),
            );
            observer.on_counts(&counts);
            counts
        };

        // Stage 4: Filter
        let filtered = {
            trace_stage!(STAGE_FILTER);
            observer.on_stage_start(STAGE_FILTER);
            let clock = StageClock::start();
            let filtered = self.filter.apply(counts.clone());
            observer.on_stage_end(
                STAGE_FILTER,
                &StageReport::new(clock.elapsed()).with_items(filtered.len()),
            );
            filtered
        };

        tracing::debug!(
            sentences = sentences.len(),
            candidates = candidates.len(),
            retained = filtered.len(),
            "extraction finished"
        );

        Ok(Extraction {
            candidates,
            counts,
            filtered,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::LexiconTagger;
    use crate::errors::TermError;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::PosTag;

    fn sample_sentences() -> Vec<TaggedSentence> {
        // "neural network training improves neural network accuracy"
        vec![
            TaggedSentence::from_pairs(&[
                ("neural", "JJ"),
                ("network", "NN"),
                ("training", "NN"),
                ("improves", "VBZ"),
                ("neural", "JJ"),
                ("network", "NN"),
                ("accuracy", "NN"),
            ]),
            TaggedSentence::from_pairs(&[
                ("analysis", "NN"),
                ("of", "IN"),
                ("variance", "NN"),
            ]),
        ]
    }

    #[test]
    fn test_extract_counts_whole_corpus() {
        let corpus = "neural network training improves neural network accuracy\n\
                      analysis of variance\n\
                      neural network training again. neural network training wins.\n\
                      analysis of variance twice, analysis of variance";
        let pipeline = TermPipeline::from_config(ExtractionConfig::default()).unwrap();
        let result = pipeline.extract(&sample_sentences(), corpus).unwrap();

        assert_eq!(
            result.candidates.as_slice(),
            &[
                "neural network training".to_string(),
                "neural network accuracy".to_string(),
                "analysis of variance".to_string(),
            ]
        );
        assert_eq!(
            result.counts,
            vec![
                TermCount::new("neural network training", 3),
                TermCount::new("neural network accuracy", 1),
                TermCount::new("analysis of variance", 3),
            ]
        );
        assert_eq!(
            result.filtered,
            vec![
                TermCount::new("neural network training", 3),
                TermCount::new("analysis of variance", 3),
            ]
        );
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let pipeline = TermPipeline::from_config(ExtractionConfig::default()).unwrap();
        let mut observer = StageTimingObserver::new();
        pipeline
            .extract_with_observer(&sample_sentences(), "", &mut observer)
            .unwrap();
        assert_eq!(
            observer.stages(),
            vec![STAGE_CHUNK, STAGE_COLLECT, STAGE_COUNT, STAGE_FILTER]
        );
        assert_eq!(observer.reports()[1].1.items(), Some(3));
    }

    #[test]
    fn test_empty_input_is_empty_extraction() {
        let pipeline = TermPipeline::from_config(ExtractionConfig::default()).unwrap();
        let result = pipeline.extract(&[], "").unwrap();
        assert_eq!(result, Extraction::default());
    }

    #[test]
    fn test_invalid_grammar_rejected() {
        let config = ExtractionConfig::default().with_grammar(["<JJ>*<XYZ>"]);
        let err = TermPipeline::from_config(config).unwrap_err();
        assert!(matches!(err, TermError::InvalidGrammar(_)));
    }

    #[test]
    fn test_extract_text_with_lexicon_tagger() {
        let tagger = LexiconTagger::new()
            .with_words(PosTag::Verb, &["beats", "helps", "wins", "works"])
            .with_words(PosTag::Determiner, &["the"]);
        let text = "The network model beats the baseline. Network model helps. \
                    The network model wins. The network model training works.";
        let pipeline = TermPipeline::from_config(ExtractionConfig::default()).unwrap();
        let result = pipeline.extract_text(&tagger, text).unwrap();

        assert_eq!(
            result.counts,
            vec![
                TermCount::new("network model", 4),
                TermCount::new("network model training", 1),
            ]
        );
        assert_eq!(result.filtered, vec![TermCount::new("network model", 4)]);
    }
}
