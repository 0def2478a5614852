use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::vectorizer::term::{Counted, Term, TermTable};

/// TokenFrequency struct
/// Counts lemma occurrences of one analysis unit,
/// keeping lemmas in the order they were first seen.
///
/// # Examples
/// ```
/// use lemma_tf_idf::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["apple", "orange", "Apple"]);
///
/// assert_eq!(freq.token_count("apple"), 2);
/// assert_eq!(freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u64>,
    total_token_count: u64,
}

/// Adding tokens
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add a token, case-folded
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_lowercase()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Add multiple tokens
    ///
    /// # Arguments
    /// * `tokens` - Slice of tokens to add
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

/// Statistics
impl TokenFrequency {
    /// Occurrences of a token, 0 if unseen
    #[inline]
    pub fn token_count(&self, token: &str) -> u64 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens added
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    /// Relative frequency of a token (0.0~1.0), 0.0 when empty
    #[inline]
    pub fn relative_frequency(&self, token: &str) -> f64 {
        if self.total_token_count == 0 {
            return 0.0;
        }
        self.token_count(token) as f64 / self.total_token_count as f64
    }

    /// Tokens with their counts in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Build one `Term` per distinct token.
    ///
    /// # Errors
    /// [`Error::EmptyAnalysis`] if no token was added.
    pub fn into_term_table(self) -> Result<TermTable<Counted>> {
        let token_sum = self.total_token_count;
        if token_sum == 0 {
            return Err(Error::EmptyAnalysis);
        }
        let terms = self
            .token_count
            .into_iter()
            .map(|(token, count)| {
                let key: Box<str> = token.as_str().into();
                (key, Term::counted(token, count, token_sum))
            })
            .collect();
        Ok(TermTable::from_parts(terms, token_sum))
    }
}

/// Count a lemma stream into a term table.
///
/// # Errors
/// [`Error::EmptyAnalysis`] for an empty stream.
pub fn analyse<T>(lemmas: &[T]) -> Result<TermTable<Counted>>
where
    T: AsRef<str>,
{
    let mut freq = TokenFrequency::new();
    freq.add_tokens(lemmas);
    debug!(tokens = freq.token_sum(), distinct = freq.token_num(), "counted analysis unit");
    freq.into_term_table()
}
