use std::collections::{HashMap, HashSet};

use ahash::RandomState;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::term::{Counted, Searched, TermTable};

/// Lemma streams of the reference documents, one per document, in corpus order.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceCorpus {
    documents: Vec<Vec<String>>,
}

impl ReferenceCorpus {
    pub fn new() -> Self {
        Self { documents: Vec::new() }
    }

    pub fn from_streams(documents: Vec<Vec<String>>) -> Self {
        Self { documents }
    }

    /// Build from space-joined lemma strings, one per document
    pub fn from_joined<T>(documents: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut corpus = Self::new();
        for doc in documents {
            corpus.add_joined(doc.as_ref());
        }
        corpus
    }

    pub fn add_stream(&mut self, lemmas: Vec<String>) -> &mut Self {
        self.documents.push(lemmas);
        self
    }

    pub fn add_joined(&mut self, lemmas: &str) -> &mut Self {
        self.add_stream(lemmas.split_whitespace().map(str::to_string).collect())
    }

    /// Number of reference documents
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.documents.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    /// Distinct lemmas of one document
    fn distinct(doc: &[String]) -> HashSet<&str, RandomState> {
        let mut set = HashSet::with_capacity_and_hasher(doc.len(), RandomState::new());
        set.extend(doc.iter().map(String::as_str));
        set
    }

    /// Count, for every term, the documents containing it.
    ///
    /// A document adds at most 1 to a term however often the lemma occurs in it.
    pub fn search(&self, table: TermTable<Counted>) -> TermTable<Searched> {
        let mut hits = 0u64;
        let searched = table.advance(|terms| {
            for doc in &self.documents {
                for lemma in Self::distinct(doc) {
                    if let Some(term) = terms.get_mut(lemma) {
                        term.document_frequency += 1;
                        hits += 1;
                    }
                }
            }
        });
        debug!(documents = self.documents.len(), terms = searched.len(), hits, "corpus search done");
        searched
    }

    /// Same counts as [`search`](Self::search), sharded across the rayon pool
    /// and reduced before the terms are written.
    pub fn par_search(&self, table: TermTable<Counted>) -> TermTable<Searched> {
        let counts: HashMap<&str, u64, RandomState> = self
            .documents
            .par_iter()
            .fold(
                || HashMap::with_hasher(RandomState::new()),
                |mut acc, doc| {
                    for lemma in Self::distinct(doc) {
                        if table.contains(lemma) {
                            *acc.entry(lemma).or_insert(0) += 1;
                        }
                    }
                    acc
                },
            )
            .reduce(
                || HashMap::with_hasher(RandomState::new()),
                |mut left, right| {
                    for (lemma, count) in right {
                        *left.entry(lemma).or_insert(0) += count;
                    }
                    left
                },
            );
        debug!(documents = self.documents.len(), matched = counts.len(), "parallel corpus search done");

        table.advance(|terms| {
            for (lemma, count) in &counts {
                if let Some(term) = terms.get_mut(*lemma) {
                    term.document_frequency += count;
                }
            }
        })
    }
}
