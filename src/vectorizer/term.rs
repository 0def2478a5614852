use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statistics of one distinct lemma within one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// lemma, unique within the run
    pub text: String,
    /// share of the analysis unit's tokens equal to this lemma (0.0~1.0)
    pub relative_frequency: f64,
    /// occurrences within the analysis unit, at least 1
    pub raw_count: u64,
    /// reference documents containing the lemma at least once
    pub document_frequency: u64,
    pub idf: f64,
    pub tf_idf: f64,
}

impl Term {
    pub(crate) fn counted(text: String, raw_count: u64, token_sum: u64) -> Self {
        Self {
            text,
            relative_frequency: raw_count as f64 / token_sum as f64,
            raw_count,
            document_frequency: 0,
            idf: 0.0,
            tf_idf: 0.0,
        }
    }
}

/// Phase marker: raw counts and relative frequencies are set.
#[derive(Debug, Clone, Copy)]
pub struct Counted;

/// Phase marker: document frequencies are set.
#[derive(Debug, Clone, Copy)]
pub struct Searched;

/// Phase marker: idf and tf-idf are set, the table is final.
#[derive(Debug, Clone, Copy)]
pub struct Scored;

/// Terms of one analysis run, keyed by lemma, in first-counted order.
///
/// The phase parameter records which statistics are filled in. Only corpus
/// search turns a `Counted` table into a `Searched` one, and only the scorer
/// turns a `Searched` table into a `Scored` one, so each field is written in
/// exactly one phase.
#[derive(Debug, Clone)]
pub struct TermTable<S = Scored> {
    terms: IndexMap<Box<str>, Term>,
    token_sum: u64,
    _phase: PhantomData<S>,
}

impl<S> TermTable<S> {
    pub(crate) fn from_parts(terms: IndexMap<Box<str>, Term>, token_sum: u64) -> Self {
        Self {
            terms,
            token_sum,
            _phase: PhantomData,
        }
    }

    /// Move to the next phase, handing out write access to the terms
    pub(crate) fn advance<T>(self, mut write: impl FnMut(&mut IndexMap<Box<str>, Term>)) -> TermTable<T> {
        let mut terms = self.terms;
        write(&mut terms);
        TermTable::from_parts(terms, self.token_sum)
    }

    /// Number of distinct lemmas
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total tokens of the analysis unit
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.token_sum
    }

    pub fn get(&self, lemma: &str) -> Option<&Term> {
        self.terms.get(lemma)
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.terms.contains_key(lemma)
    }

    /// Terms in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|k| k.as_ref())
    }
}

impl TermTable<Scored> {
    pub fn into_terms(self) -> Vec<Term> {
        self.terms.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_term_starts_unscored() {
        let term = Term::counted("λόγος".to_string(), 2, 8);
        assert_eq!(term.relative_frequency, 0.25);
        assert_eq!(term.document_frequency, 0);
        assert_eq!(term.idf, 0.0);
        assert_eq!(term.tf_idf, 0.0);
    }

    #[test]
    fn advance_keeps_order_and_token_sum() {
        let mut terms = IndexMap::new();
        terms.insert("b".into(), Term::counted("b".to_string(), 1, 3));
        terms.insert("a".into(), Term::counted("a".to_string(), 2, 3));
        let table: TermTable<Counted> = TermTable::from_parts(terms, 3);

        let searched: TermTable<Searched> = table.advance(|terms| {
            if let Some(term) = terms.get_mut("a") {
                term.document_frequency = 4;
            }
        });
        assert_eq!(searched.lemmas().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(searched.token_sum(), 3);
        assert_eq!(searched.get("a").map(|t| t.document_frequency), Some(4));
    }
}
