/// This crate ranks the lemmas of a group of historical-language texts
/// by TF-IDF against a larger reference corpus.
pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod text;
pub mod vectorizer;

/// Analysis run
/// The top-level entry point: discovers the analysis group and the
/// reference corpus, lemmatizes both, and returns an `AnalysisReport`
/// with the ranked terms.
///
/// `TfIdfAnalysis<L, O, S, E>` has the following generic parameters:
/// - `L`: lemmatizer (e.g., `LookupLemmatizer`)
/// - `O`: orthographic normalizer (default `UnicodeComposition`)
/// - `S`: text source (default `FsTextSource`)
/// - `E`: TF-IDF calculation engine (default `DefaultTfIdfEngine`)
pub use analysis::{AnalysisReport, SourceSet, TfIdfAnalysis};

/// Run configuration
/// Punctuation set, zero-document-frequency sentinel, top-N cutoff and
/// parallelism. Loadable from JSON.
pub use config::AnalysisConfig;

pub use error::{Error, Result};

/// Document Pipeline
/// Reads documents, normalizes them and turns them into lemma streams,
/// either counted (`Mode::Statistics`) or space-joined (`Mode::TokensOnly`).
pub use pipeline::{DocumentPipeline, Mode, Processed};

/// Storage collaborator
/// `FsTextSource` walks directories for `.txt` files.
pub use storage::{FsTextSource, TextSource};

/// Lemmatizer collaborator
/// The morphological lemmatizer is opaque to this crate.
/// `IdentityLemmatizer` and `LookupLemmatizer` are provided for
/// tests and table-driven lemmatization.
pub use text::lemma::{IdentityLemmatizer, Lemmatizer, LookupLemmatizer};

pub use text::normalizer::{Normalizer, OrthographicNormalizer, UnicodeComposition};

/// Reference corpus
/// Lemma streams of the reference documents.
/// Answers in how many documents each term occurs (document frequency).
pub use vectorizer::corpus::ReferenceCorpus;

/// Term records
/// `TermTable<S>` holds one `Term` per distinct lemma. The phase parameter
/// (`Counted`, `Searched`, `Scored`) tracks which statistics are filled in.
pub use vectorizer::term::{Counted, Scored, Searched, Term, TermTable};

/// Token Frequency structure
/// Counts lemma occurrences within one analysis unit in first-seen order.
pub use vectorizer::token::{analyse, TokenFrequency};

/// TF IDF Calculation Engine Trait
/// `DefaultTfIdfEngine` computes `ln(N / df) * raw_count`; terms absent from
/// the corpus receive the configured sentinel instead.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, Scorer, TfIdfEngine};

/// Ranked terms, stable-sorted by descending tf-idf
pub use vectorizer::rank::RankedTerms;
