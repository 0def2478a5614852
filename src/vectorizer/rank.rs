use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vectorizer::term::{Scored, Term, TermTable};

/// Scored terms by descending tf-idf.
///
/// Equal scores keep the order in which the lemmas were first counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerms {
    pub list: Vec<Term>,
}

impl RankedTerms {
    /// Stable sort by tf-idf, descending
    pub fn new(mut list: Vec<Term>) -> Self {
        list.sort_by(|a, b| b.tf_idf.total_cmp(&a.tf_idf));
        Self { list }
    }

    /// The `n` best terms, fewer if there are not that many
    pub fn top(&self, n: usize) -> &[Term] {
        &self.list[..n.min(self.list.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Table view of the first `n` terms
    pub fn display_top(&self, n: usize) -> TopTerms<'_> {
        TopTerms { terms: self.top(n) }
    }
}

impl From<TermTable<Scored>> for RankedTerms {
    fn from(table: TermTable<Scored>) -> Self {
        Self::new(table.into_terms())
    }
}

impl TermTable<Scored> {
    pub fn into_ranked(self) -> RankedTerms {
        self.into()
    }
}

/// Borrowed table view over the head of a ranking
pub struct TopTerms<'a> {
    terms: &'a [Term],
}

impl fmt::Display for TopTerms<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "{:>4}  {:<24} {:>12} {:>6} {:>6} {:>10}", "#", "term", "tf-idf", "count", "df", "freq")?;
            for (rank, term) in self.terms.iter().enumerate() {
                writeln!(
                    f,
                    "{:>4}  {:<24} {:>12.4} {:>6} {:>6} {:>10.6}",
                    rank + 1,
                    term.text,
                    term.tf_idf,
                    term.raw_count,
                    term.document_frequency,
                    term.relative_frequency
                )?;
            }
            Ok(())
        } else {
            for term in self.terms {
                writeln!(f, "Word: {}, score: {}", term.text, term.tf_idf)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for RankedTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = TopTerms { terms: &self.list };
        if f.alternate() {
            write!(f, "{view:#}")
        } else {
            write!(f, "{view}")
        }
    }
}
