use std::{fmt, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::pipeline::DocumentPipeline;
use crate::storage::{FsTextSource, TextSource};
use crate::text::lemma::Lemmatizer;
use crate::text::normalizer::{OrthographicNormalizer, UnicodeComposition};
use crate::vectorizer::rank::RankedTerms;
use crate::vectorizer::term::Term;
use crate::vectorizer::tfidf::{DefaultTfIdfEngine, Scorer, TfIdfEngine};

/// Files that made up one side of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
    pub path: PathBuf,
    pub file_count: usize,
    pub files: Vec<PathBuf>,
}

impl SourceSet {
    fn new(path: &Path, files: Vec<PathBuf>) -> Self {
        Self {
            path: path.to_path_buf(),
            file_count: files.len(),
            files,
        }
    }
}

/// Everything a run hands to reporting and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub corpus: SourceSet,
    pub analysis: SourceSet,
    pub total_reference_documents: u64,
    /// tokens in the analysis unit
    pub total_tokens: u64,
    /// distinct lemmas in the analysis unit
    pub total_terms: usize,
    pub top_n: usize,
    pub ranked: RankedTerms,
}

impl AnalysisReport {
    /// The configured number of best terms
    pub fn top(&self) -> &[Term] {
        self.ranked.top(self.top_n)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} analysis file(s), {} tokens, {} terms against {} reference document(s)",
            self.analysis.file_count, self.total_tokens, self.total_terms, self.total_reference_documents
        )?;
        write!(f, "{:#}", self.ranked.display_top(self.top_n))
    }
}

/// One batch run: analysis group and reference corpus in, ranked terms out.
pub struct TfIdfAnalysis<L, O = UnicodeComposition, S = FsTextSource, E = DefaultTfIdfEngine>
where
    L: Lemmatizer,
    O: OrthographicNormalizer,
    S: TextSource,
    E: TfIdfEngine,
{
    pipeline: DocumentPipeline<L, O, S>,
    scorer: Scorer<E>,
    config: AnalysisConfig,
}

impl<L> TfIdfAnalysis<L>
where
    L: Lemmatizer,
{
    pub fn new(lemmatizer: L, config: AnalysisConfig) -> Self {
        let pipeline = DocumentPipeline::new(lemmatizer, &config);
        let scorer = Scorer::with_sentinel(config.zero_df_sentinel);
        Self { pipeline, scorer, config }
    }
}

impl<L, O, S, E> TfIdfAnalysis<L, O, S, E>
where
    L: Lemmatizer,
    O: OrthographicNormalizer,
    S: TextSource,
    E: TfIdfEngine,
{
    pub fn from_parts(pipeline: DocumentPipeline<L, O, S>, scorer: Scorer<E>, config: AnalysisConfig) -> Self {
        Self { pipeline, scorer, config }
    }

    pub fn pipeline(&self) -> &DocumentPipeline<L, O, S> {
        &self.pipeline
    }

    /// Full run over two roots, each a directory or a single text file.
    pub fn run(&self, corpus_root: &Path, analysis_root: &Path) -> Result<AnalysisReport> {
        let source = self.pipeline.source();
        let corpus_files = source.discover(corpus_root)?;
        let analysis_files = source.discover(analysis_root)?;

        // count first so an empty group fails before the corpus is lemmatized
        let counted = self.pipeline.analyse_unit(&analysis_files)?;
        let total_tokens = counted.token_sum();
        let total_terms = counted.len();

        let corpus = self.pipeline.build_reference_corpus(&corpus_files)?;
        let searched = if self.config.parallel {
            corpus.par_search(counted)
        } else {
            corpus.search(counted)
        };
        let ranked = self.scorer.score_against(&corpus, searched)?.into_ranked();

        info!(
            corpus = %corpus_root.display(),
            analysis = %analysis_root.display(),
            documents = corpus.doc_num(),
            terms = total_terms,
            "analysis run complete"
        );
        Ok(AnalysisReport {
            corpus: SourceSet::new(corpus_root, corpus_files),
            analysis: SourceSet::new(analysis_root, analysis_files),
            total_reference_documents: corpus.doc_num(),
            total_tokens,
            total_terms,
            top_n: self.config.top_n,
            ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::Error;
    use crate::text::lemma::IdentityLemmatizer;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn run_ranks_group_against_corpus() {
        let corpus = tempfile::tempdir().unwrap();
        write(corpus.path(), "1.txt", "apple orange");
        write(corpus.path(), "2.txt", "banana apple");
        let group = tempfile::tempdir().unwrap();
        write(group.path(), "g.txt", "apple orange apple kiwi");

        let config = AnalysisConfig { parallel: false, ..AnalysisConfig::default() };
        let report = TfIdfAnalysis::new(IdentityLemmatizer, config).run(corpus.path(), group.path()).unwrap();

        assert_eq!(report.total_reference_documents, 2);
        assert_eq!(report.total_tokens, 4);
        assert_eq!(report.total_terms, 3);
        let order: Vec<&str> = report.ranked.iter().map(|t| t.text.as_str()).collect();
        // kiwi is unseen, orange is in half the corpus, apple in all of it
        assert_eq!(order, vec!["kiwi", "orange", "apple"]);
        assert_eq!(report.ranked.list[0].tf_idf, 10_000.0);
        assert!((report.ranked.list[1].tf_idf - 2f64.ln()).abs() < 1e-12);
        assert_eq!(report.ranked.list[2].tf_idf, 0.0);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let corpus = tempfile::tempdir().unwrap();
        let group = tempfile::tempdir().unwrap();
        write(group.path(), "g.txt", "λόγος");
        let err = TfIdfAnalysis::new(IdentityLemmatizer, AnalysisConfig::default())
            .run(corpus.path(), group.path())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus));
    }

    #[test]
    fn report_top_respects_top_n() {
        let corpus = tempfile::tempdir().unwrap();
        write(corpus.path(), "1.txt", "a");
        let group = tempfile::tempdir().unwrap();
        write(group.path(), "g.txt", "a b c d e");
        let config = AnalysisConfig { top_n: 2, ..AnalysisConfig::default() };
        let report = TfIdfAnalysis::new(IdentityLemmatizer, config).run(corpus.path(), group.path()).unwrap();
        assert_eq!(report.top().len(), 2);
        assert_eq!(report.to_string().lines().count(), 1 + 1 + 2);
    }
}
