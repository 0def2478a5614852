use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::config::DEFAULT_ZERO_DF_SENTINEL;
use crate::error::{Error, Result};
use crate::vectorizer::corpus::ReferenceCorpus;
use crate::vectorizer::term::{Scored, Searched, Term, TermTable};

/// TF-IDF calculation strategy.
///
/// Only called for terms with a document frequency of at least 1.
pub trait TfIdfEngine {
    /// idf of a term found in `document_frequency` of `total_docs` documents
    fn idf(total_docs: u64, document_frequency: u64) -> f64;

    /// Final score of a term given its idf
    fn tf_idf(idf: f64, term: &Term) -> f64;
}

/// `idf = ln(N / df)`, `tf_idf = idf * raw_count`.
///
/// The raw in-unit count scales the score, not the relative frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    #[inline]
    fn idf(total_docs: u64, document_frequency: u64) -> f64 {
        (total_docs as f64 / document_frequency as f64).ln()
    }

    #[inline]
    fn tf_idf(idf: f64, term: &Term) -> f64 {
        idf * term.raw_count as f64
    }
}

/// Fills in idf and tf-idf of a searched term table.
#[derive(Debug, Clone)]
pub struct Scorer<E = DefaultTfIdfEngine>
where
    E: TfIdfEngine,
{
    zero_df_sentinel: f64,
    _marker: PhantomData<E>,
}

impl Scorer<DefaultTfIdfEngine> {
    pub fn new() -> Self {
        Self::with_sentinel(DEFAULT_ZERO_DF_SENTINEL)
    }
}

impl Default for Scorer<DefaultTfIdfEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scorer<E>
where
    E: TfIdfEngine,
{
    /// `zero_df_sentinel` is the tf-idf of terms no reference document contains
    pub fn with_sentinel(zero_df_sentinel: f64) -> Self {
        Self {
            zero_df_sentinel,
            _marker: PhantomData,
        }
    }

    pub fn zero_df_sentinel(&self) -> f64 {
        self.zero_df_sentinel
    }

    /// Score every term against a corpus of `total_docs` documents.
    ///
    /// A term with document frequency 0 gets the sentinel as tf-idf and keeps idf 0.
    ///
    /// # Errors
    /// [`Error::EmptyCorpus`] if `total_docs` is 0.
    pub fn score(&self, total_docs: u64, table: TermTable<Searched>) -> Result<TermTable<Scored>> {
        if total_docs == 0 {
            return Err(Error::EmptyCorpus);
        }
        let sentinel = self.zero_df_sentinel;
        let mut unseen = 0usize;
        let scored = table.advance(|terms| {
            for term in terms.values_mut() {
                if term.document_frequency == 0 {
                    term.idf = 0.0;
                    term.tf_idf = sentinel;
                    unseen += 1;
                    continue;
                }
                if term.document_frequency > total_docs {
                    warn!(
                        term = %term.text,
                        document_frequency = term.document_frequency,
                        total_docs,
                        "document frequency exceeds corpus size"
                    );
                }
                term.idf = E::idf(total_docs, term.document_frequency);
                term.tf_idf = E::tf_idf(term.idf, term);
            }
        });
        debug!(total_docs, terms = scored.len(), unseen, "scored terms");
        Ok(scored)
    }

    /// Score against the corpus the table was searched in
    pub fn score_against(&self, corpus: &ReferenceCorpus, table: TermTable<Searched>) -> Result<TermTable<Scored>> {
        self.score(corpus.doc_num(), table)
    }
}
