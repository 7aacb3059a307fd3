//! termrank command line
//!
//! One subcommand per stage of the terminology workflow: normalize raw texts,
//! compare corpus statistics, extract candidates from a tagged corpus, and
//! rank a term list by TTF-IDF, per-document TF-IDF or C-Value.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` to adjust the
//! level (default `info`). Any error is logged and the process exits with
//! status 1 without writing the requested output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use termrank::corpus::{
    load_corpus, load_documents, load_documents_excluding, load_tagged_corpus, load_term_list,
    merge_documents,
};
use termrank::nlp::normalize::TextNormalizer;
use termrank::nlp::stats::{write_stats_markdown, CorpusStats};
use termrank::pipeline::TracingObserver;
use termrank::report::{
    write_atomically, write_c_value_csv, write_term_frequencies, write_tfidf_csv,
    write_ttf_idf_csv,
};
use termrank::{
    CValueScorer, Document, ExtractionConfig, Result, TermError, TermPipeline, TfIdfScorer,
    TtfIdfScorer, Vocabulary,
};

#[derive(Parser, Debug)]
#[command(name = "termrank", version, about = "Multi-word terminology extraction and ranking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract candidate terms from a tagged corpus and count them in the full text
    Extract(ExtractArgs),

    /// Rank a term list by corpus-level TTF-IDF
    TtfIdf(TtfIdfArgs),

    /// Rank a term list by mean and max per-document TF-IDF
    TfIdf(TfIdfArgs),

    /// Rank a term list by C-Value
    CValue(CValueArgs),

    /// Clean raw texts: strip stop-phrases, non-letters and stopwords
    Normalize(NormalizeArgs),

    /// Compare statistics of the original and processed tagged corpora
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// JSON configuration file; absent fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConfigArg {
    fn load(&self) -> Result<ExtractionConfig> {
        match &self.config {
            Some(path) => ExtractionConfig::from_json_file(path),
            None => Ok(ExtractionConfig::default()),
        }
    }
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Tagged corpus: JSON array of sentences of [token, tag] pairs
    #[arg(long)]
    tagged: PathBuf,

    /// Processed corpus text the candidates are counted against
    #[arg(long)]
    corpus: PathBuf,

    #[arg(short, long, default_value = "terms.txt")]
    output: PathBuf,

    /// Keep candidates occurring strictly more often than this
    #[arg(long)]
    min_frequency: Option<usize>,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct TtfIdfArgs {
    /// One term per line
    #[arg(long)]
    terms: PathBuf,

    /// Directory of processed .txt documents
    #[arg(long, conflicts_with = "corpus", required_unless_present = "corpus")]
    documents: Option<PathBuf>,

    /// Single merged corpus file, scored as one document
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// N in the IDF formula; defaults to the number of documents loaded
    #[arg(long)]
    total_documents: Option<usize>,

    #[arg(short, long, default_value = "ranking_ttf_idf.csv")]
    output: PathBuf,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct TfIdfArgs {
    #[arg(long)]
    terms: PathBuf,

    #[arg(long)]
    documents: PathBuf,

    #[arg(long)]
    total_documents: Option<usize>,

    /// Order rows by the maximum weight instead of the mean
    #[arg(long)]
    by_max: bool,

    #[arg(short, long, default_value = "ranking_tfidf.csv")]
    output: PathBuf,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct CValueArgs {
    #[arg(long)]
    terms: PathBuf,

    #[arg(long)]
    corpus: PathBuf,

    #[arg(short, long, default_value = "cvalue_resultados.csv")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Directory of raw .txt documents
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving the processed documents (created if needed)
    #[arg(long)]
    output: PathBuf,

    /// Stop-phrases to strip, one per line
    #[arg(long)]
    stoplist: Option<PathBuf>,

    /// Also write the merged processed corpus to this file
    #[arg(long)]
    merged: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[arg(long)]
    original: PathBuf,

    #[arg(long)]
    processed: PathBuf,

    #[arg(short, long, default_value = "tabla.md")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract(args) => extract(args),
        Command::TtfIdf(args) => ttf_idf(args),
        Command::TfIdf(args) => tf_idf(args),
        Command::CValue(args) => c_value(args),
        Command::Normalize(args) => normalize(args),
        Command::Stats(args) => stats(args),
    }
}

fn extract(args: ExtractArgs) -> Result<()> {
    let mut config = args.config.load()?;
    if let Some(min_frequency) = args.min_frequency {
        config = config.with_min_frequency(min_frequency);
    }
    let pipeline = TermPipeline::from_config(config)?;

    let sentences = load_tagged_corpus(&args.tagged)?;
    let corpus = load_corpus(&args.corpus)?;
    tracing::info!(sentences = sentences.len(), "loaded tagged corpus");

    let extraction = pipeline.extract_with_observer(&sentences, &corpus, &mut TracingObserver)?;
    if extraction.filtered.is_empty() {
        return Err(TermError::empty_vocabulary(format!(
            "no candidate occurs more than {} times ({} candidates found)",
            pipeline.config().min_frequency,
            extraction.candidates.len()
        )));
    }

    write_atomically(&args.output, |w| write_term_frequencies(w, &extraction.filtered))?;
    tracing::info!(
        candidates = extraction.candidates.len(),
        retained = extraction.filtered.len(),
        output = %args.output.display(),
        "terms written"
    );
    Ok(())
}

fn ttf_idf(args: TtfIdfArgs) -> Result<()> {
    let config = args.config.load()?;
    let terms = load_term_list(&args.terms)?;
    let documents = match (&args.documents, &args.corpus) {
        (Some(dir), _) => load_documents(dir)?,
        (None, Some(corpus)) => vec![Document::whole_corpus(load_corpus(corpus)?)],
        (None, None) => {
            return Err(TermError::invalid_config(
                "either --documents or --corpus is required",
            ))
        }
    };
    let total = args.total_documents.unwrap_or(documents.len());
    tracing::info!(documents = documents.len(), total, "loaded documents");

    let (lo, hi) = config.ngram_range;
    let vocab = Vocabulary::new(&terms, (lo, hi));
    let records = TtfIdfScorer::new().score(&vocab, &documents, total)?;

    write_atomically(&args.output, |w| write_ttf_idf_csv(w, &records))?;
    tracing::info!(terms = records.len(), output = %args.output.display(), "TTF-IDF ranking written");
    Ok(())
}

fn tf_idf(args: TfIdfArgs) -> Result<()> {
    let config = args.config.load()?;
    let terms = load_term_list(&args.terms)?;
    let documents = load_documents(&args.documents)?;
    let total = args.total_documents.unwrap_or(documents.len());

    let vocab = Vocabulary::new(&terms, config.ngram_range);
    let ranking = TfIdfScorer::new().score(&vocab, &documents, total)?;
    let rows = if args.by_max {
        &ranking.by_max
    } else {
        &ranking.by_mean
    };

    write_atomically(&args.output, |w| write_tfidf_csv(w, rows))?;
    tracing::info!(terms = rows.len(), output = %args.output.display(), "TF-IDF ranking written");
    Ok(())
}

fn c_value(args: CValueArgs) -> Result<()> {
    let terms = load_term_list(&args.terms)?;
    let corpus = load_corpus(&args.corpus)?;

    let records = CValueScorer::new().score_corpus(&terms, &corpus)?;

    write_atomically(&args.output, |w| write_c_value_csv(w, &records))?;
    tracing::info!(terms = records.len(), output = %args.output.display(), "C-Value ranking written");
    Ok(())
}

fn normalize(args: NormalizeArgs) -> Result<()> {
    let config = args.config.load()?;
    let excluded: Vec<&Path> = args.stoplist.iter().map(PathBuf::as_path).collect();
    let documents = load_documents_excluding(&args.input, &excluded)?;
    let stop_phrases = match &args.stoplist {
        Some(path) => load_term_list(path)?,
        None => Vec::new(),
    };

    let normalizer = TextNormalizer::from_config(&config).with_stop_phrases(stop_phrases);
    let processed = documents
        .iter()
        .map(|doc| Ok(Document::new(doc.name.clone(), normalizer.normalize(&doc.text)?)))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(&args.output)?;
    for doc in &processed {
        let path = args.output.join(&doc.name);
        write_atomically(&path, |w| {
            w.write_all(doc.text.as_bytes())?;
            Ok(())
        })?;
    }
    if let Some(merged) = &args.merged {
        let text = merge_documents(&processed);
        write_atomically(merged, |w| {
            w.write_all(text.as_bytes())?;
            Ok(())
        })?;
    }

    tracing::info!(
        documents = processed.len(),
        output = %args.output.display(),
        "documents normalized"
    );
    Ok(())
}

fn stats(args: StatsArgs) -> Result<()> {
    let original = corpus_stats(&args.original)?;
    let processed = corpus_stats(&args.processed)?;

    write_atomically(&args.output, |w| write_stats_markdown(w, &original, &processed))?;
    tracing::info!(output = %args.output.display(), "statistics written");
    Ok(())
}

fn corpus_stats(path: &Path) -> Result<CorpusStats> {
    let sentences = load_tagged_corpus(path)?;
    Ok(CorpusStats::from_sentences(&sentences))
}
