use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::storage::{FsTextSource, TextSource};
use crate::text::lemma::{LemmaAdapter, Lemmatizer};
use crate::text::normalizer::{Normalizer, OrthographicNormalizer, UnicodeComposition};
use crate::text::punctuation::PunctuationSet;
use crate::vectorizer::corpus::ReferenceCorpus;
use crate::vectorizer::term::{Counted, TermTable};
use crate::vectorizer::token::analyse;

/// What `process` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Count lemmas into a term table
    Statistics,
    /// Return the lemma stream joined by single spaces
    TokensOnly,
}

#[derive(Debug, Clone)]
pub enum Processed {
    Terms(TermTable<Counted>),
    Tokens(String),
}

/// Raw documents to lemma streams: read, normalize, lemmatize.
///
/// Collaborators are built once by the caller and injected here.
#[derive(Debug, Clone)]
pub struct DocumentPipeline<L, O = UnicodeComposition, S = FsTextSource>
where
    L: Lemmatizer,
    O: OrthographicNormalizer,
    S: TextSource,
{
    source: S,
    normalizer: Normalizer<O>,
    adapter: LemmaAdapter<L>,
    parallel: bool,
}

impl<L> DocumentPipeline<L>
where
    L: Lemmatizer,
{
    /// File-system pipeline with Unicode composition as orthography
    pub fn new(lemmatizer: L, config: &AnalysisConfig) -> Self {
        Self::with_parts(
            FsTextSource::with_extension(&config.file_extension),
            Normalizer::new(),
            lemmatizer,
            config,
        )
    }
}

impl<L, O, S> DocumentPipeline<L, O, S>
where
    L: Lemmatizer,
    O: OrthographicNormalizer,
    S: TextSource,
{
    pub fn with_parts(source: S, normalizer: Normalizer<O>, lemmatizer: L, config: &AnalysisConfig) -> Self {
        Self {
            source,
            normalizer,
            adapter: LemmaAdapter::new(lemmatizer, PunctuationSet::statistics(&config.punctuation_extra)),
            parallel: config.parallel,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Texts of all paths joined by newlines, in input order
    fn read_unit<P: AsRef<Path>>(&self, paths: &[P]) -> Result<String> {
        let mut unit = String::new();
        for path in paths {
            if !unit.is_empty() {
                unit.push('\n');
            }
            unit.push_str(&self.source.read(path.as_ref())?);
        }
        Ok(unit)
    }

    /// Lemma stream of raw text.
    ///
    /// A lemma containing whitespace becomes several tokens, on the
    /// analysis side and the corpus side alike.
    pub fn lemmas_of_text(&self, raw: &str) -> Result<Vec<String>> {
        let normalized = self.normalizer.normalize(raw);
        let lemmas = self.adapter.lemmatize(&normalized)?;
        Ok(lemmas
            .iter()
            .flat_map(|lemma| lemma.split_whitespace())
            .map(str::to_string)
            .collect())
    }

    /// Lemma stream of the analysis unit formed by `paths`
    pub fn lemmas<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<String>> {
        let unit = self.read_unit(paths)?;
        self.lemmas_of_text(&unit)
    }

    pub fn process<P: AsRef<Path>>(&self, paths: &[P], mode: Mode) -> Result<Processed> {
        let lemmas = self.lemmas(paths)?;
        debug!(files = paths.len(), lemmas = lemmas.len(), ?mode, "processed unit");
        match mode {
            Mode::Statistics => Ok(Processed::Terms(analyse(&lemmas)?)),
            Mode::TokensOnly => Ok(Processed::Tokens(lemmas.join(" "))),
        }
    }

    /// All `paths` as one analysis unit, counted.
    ///
    /// # Errors
    /// [`Error::EmptyAnalysis`](crate::Error::EmptyAnalysis) if nothing survives lemmatization.
    pub fn analyse_unit<P: AsRef<Path>>(&self, paths: &[P]) -> Result<TermTable<Counted>> {
        analyse(&self.lemmas(paths)?)
    }

    /// Space-joined lemma stream of a single reference document
    pub fn corpus_tokens(&self, path: &Path) -> Result<String> {
        Ok(self.lemmas(&[path])?.join(" "))
    }

    /// One corpus entry per path, each processed on its own, stored in path order.
    pub fn build_reference_corpus(&self, paths: &[PathBuf]) -> Result<ReferenceCorpus> {
        let joined: Vec<String> = if self.parallel {
            paths.par_iter().map(|path| self.corpus_tokens(path)).collect::<Result<_>>()?
        } else {
            paths.iter().map(|path| self.corpus_tokens(path)).collect::<Result<_>>()?
        };
        let corpus = ReferenceCorpus::from_joined(&joined);
        info!(documents = corpus.doc_num(), parallel = self.parallel, "built reference corpus");
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::Error;
    use crate::text::lemma::{IdentityLemmatizer, LookupLemmatizer};

    /// In-memory documents keyed by path
    struct MemorySource(HashMap<PathBuf, String>);

    impl MemorySource {
        fn new(docs: &[(&str, &str)]) -> Self {
            Self(docs.iter().map(|(p, t)| (PathBuf::from(p), t.to_string())).collect())
        }
    }

    impl TextSource for MemorySource {
        fn discover(&self, _root: &Path) -> Result<Vec<PathBuf>> {
            let mut paths: Vec<PathBuf> = self.0.keys().cloned().collect();
            paths.sort();
            Ok(paths)
        }

        fn read(&self, path: &Path) -> Result<String> {
            self.0.get(path).cloned().ok_or_else(|| {
                Error::input(path, std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
            })
        }
    }

    fn pipeline<L: Lemmatizer>(lemmatizer: L, docs: &[(&str, &str)]) -> DocumentPipeline<L, UnicodeComposition, MemorySource> {
        DocumentPipeline::with_parts(MemorySource::new(docs), Normalizer::new(), lemmatizer, &AnalysisConfig::default())
    }

    #[test]
    fn statistics_mode_counts_the_combined_unit() {
        let p = pipeline(IdentityLemmatizer, &[("a.txt", "apple orange"), ("b.txt", "Apple.")]);
        let Processed::Terms(table) = p.process(&["a.txt", "b.txt"], Mode::Statistics).unwrap() else {
            panic!("expected terms");
        };
        assert_eq!(table.get("apple").unwrap().raw_count, 2);
        assert_eq!(table.get("orange").unwrap().raw_count, 1);
        assert_eq!(table.token_sum(), 3);
    }

    #[test]
    fn files_are_joined_with_a_newline() {
        // without the separator "καὶ" and "τό" would fuse into one token
        let p = pipeline(IdentityLemmatizer, &[("a.txt", "λόγος καὶ"), ("b.txt", "τὸ ἔργον")]);
        let lemmas = p.lemmas(&["a.txt", "b.txt"]).unwrap();
        assert_eq!(lemmas, vec!["λόγος", "καί", "τό", "ἔργον"]);
    }

    #[test]
    fn tokens_only_mode_joins_with_spaces() {
        let mut table = LookupLemmatizer::new();
        table.insert("λόγου", "λόγος");
        let p = pipeline(table, &[("c.txt", "col3 τοῦ λόγου, [lost text] ±4 λόγου")]);
        let Processed::Tokens(tokens) = p.process(&["c.txt"], Mode::TokensOnly).unwrap() else {
            panic!("expected tokens");
        };
        assert_eq!(tokens, "τοῦ λόγος λόγος");
    }

    #[test]
    fn ano_teleia_and_double_brackets_separate_words() {
        let p = pipeline(IdentityLemmatizer, &[("a.txt", "λόγος\u{0387}καὶ θεός"), ("b.txt", "⟦τὸν⟧λόγον")]);
        assert_eq!(p.lemmas(&["a.txt"]).unwrap(), vec!["λόγος", "καί", "θεός"]);
        assert_eq!(p.lemmas(&["b.txt"]).unwrap(), vec!["τόν", "λόγον"]);
    }

    #[test]
    fn empty_unit_is_rejected() {
        let p = pipeline(IdentityLemmatizer, &[("e.txt", " [lost text] … ")]);
        assert!(matches!(p.analyse_unit(&["e.txt"]), Err(Error::EmptyAnalysis)));
    }

    #[test]
    fn missing_document_is_an_input_error() {
        let p = pipeline(IdentityLemmatizer, &[]);
        assert!(matches!(p.lemmas(&["nope.txt"]), Err(Error::Input { .. })));
    }

    #[test]
    fn reference_corpus_keeps_path_order_in_parallel() {
        let docs: Vec<(String, String)> = (0..40).map(|i| (format!("{i:02}.txt"), format!("w{i} common"))).collect();
        let refs: Vec<(&str, &str)> = docs.iter().map(|(p, t)| (p.as_str(), t.as_str())).collect();
        let p = pipeline(IdentityLemmatizer, &refs);
        let paths = p.source().discover(Path::new("")).unwrap();
        let corpus = p.build_reference_corpus(&paths).unwrap();
        assert_eq!(corpus.doc_num(), 40);
        for (i, doc) in corpus.documents().iter().enumerate() {
            assert_eq!(doc, &vec![format!("w{i}"), "common".to_string()]);
        }
    }
}
