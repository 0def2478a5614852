use std::{collections::HashMap, fs, path::Path, sync::{Arc, LazyLock}};

use ahash::RandomState;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::punctuation::PunctuationSet;

/// Lemmas the lemmatizer emits for pure punctuation and column artifacts
pub const STRUCTURAL_LEMMAS: [&str; 2] = ["punc", "col"];

/// Grave-accented vowels and their acute (tonos) counterparts
pub const GRAVE_TO_ACUTE: [(char, char); 7] = [
    ('\u{1F70}', '\u{03AC}'), // ὰ -> ά
    ('\u{1F72}', '\u{03AD}'), // ὲ -> έ
    ('\u{1F74}', '\u{03AE}'), // ὴ -> ή
    ('\u{1F76}', '\u{03AF}'), // ὶ -> ί
    ('\u{1F7A}', '\u{03CD}'), // ὺ -> ύ
    ('\u{1F78}', '\u{03CC}'), // ὸ -> ό
    ('\u{1F7C}', '\u{03CE}'), // ὼ -> ώ
];

static COLUMN_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"col\d+").expect("valid regex"));
static LACUNA_LENGTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"±\d+").expect("valid regex"));
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid regex"));
static CRITICAL_SIGNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[⏑–†]").expect("valid regex"));

/// Morphological lemmatizer.
///
/// Returns one `(token, lemma)` pair per input token, in input order.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, String)>;
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for Arc<L> {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, String)> {
        (**self).lemmatize(tokens)
    }
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for Box<L> {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, String)> {
        (**self).lemmatize(tokens)
    }
}

/// Every token is its own lemma
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, String)> {
        tokens.iter().map(|t| (t.clone(), t.clone())).collect()
    }
}

/// Table-driven lemmatizer: known forms map to their lemma,
/// unknown forms are returned unchanged.
///
/// # Examples
/// ```
/// use lemma_tf_idf::text::lemma::{Lemmatizer, LookupLemmatizer};
/// let mut lemmatizer = LookupLemmatizer::new();
/// lemmatizer.insert("λόγου", "λόγος");
/// let pairs = lemmatizer.lemmatize(&["λόγου".to_string(), "καί".to_string()]);
/// assert_eq!(pairs[0].1, "λόγος");
/// assert_eq!(pairs[1].1, "καί");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookupLemmatizer {
    table: HashMap<String, String, RandomState>,
}

impl LookupLemmatizer {
    pub fn new() -> Self {
        Self {
            table: HashMap::with_hasher(RandomState::new()),
        }
    }

    pub fn insert(&mut self, form: &str, lemma: &str) -> &mut Self {
        self.table.insert(form.to_string(), lemma.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Parse `form<TAB>lemma` lines. Blank lines and lines starting
    /// with `#` are ignored, malformed lines are skipped with a warning.
    pub fn from_tsv_str(tsv: &str) -> Self {
        let mut lemmatizer = Self::new();
        for (line_no, line) in tsv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((form, lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    lemmatizer.insert(form.trim(), lemma.trim());
                }
                _ => warn!(line = line_no + 1, "skipping malformed lemma table line"),
            }
        }
        lemmatizer
    }

    pub fn from_tsv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let tsv = fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
        let lemmatizer = Self::from_tsv_str(&tsv);
        debug!(path = %path.display(), forms = lemmatizer.len(), "loaded lemma table");
        Ok(lemmatizer)
    }
}

impl Lemmatizer for LookupLemmatizer {
    fn lemmatize(&self, tokens: &[String]) -> Vec<(String, String)> {
        tokens
            .iter()
            .map(|t| {
                let lemma = self.table.get(t).unwrap_or(t);
                (t.clone(), lemma.clone())
            })
            .collect()
    }
}

/// Remove scholarly annotation that is not part of the text:
/// column markers, lacuna lengths, bracketed restorations and critical signs.
pub fn strip_editorial_markup(text: &str) -> String {
    let text = COLUMN_MARKER.replace_all(text, "");
    let text = LACUNA_LENGTH.replace_all(&text, "");
    let text = BRACKETED.replace_all(&text, "");
    CRITICAL_SIGNS.replace_all(&text, "").into_owned()
}

/// Fold grave-accented vowels onto their acute forms
pub fn grave_to_acute(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            GRAVE_TO_ACUTE
                .iter()
                .find(|(grave, _)| *grave == c)
                .map_or(c, |(_, acute)| *acute)
        })
        .collect()
}

/// Wraps a [`Lemmatizer`] with the token cleaning that must happen before it
/// and the lemma filtering that must happen after it.
#[derive(Debug, Clone)]
pub struct LemmaAdapter<L>
where
    L: Lemmatizer,
{
    lemmatizer: L,
    punctuation: PunctuationSet,
}

impl<L> LemmaAdapter<L>
where
    L: Lemmatizer,
{
    pub fn new(lemmatizer: L, punctuation: PunctuationSet) -> Self {
        Self { lemmatizer, punctuation }
    }

    /// Whitespace-split cleaned tokens of normalized text, editorial markup removed
    pub fn tokenize(&self, normalized: &str) -> Vec<String> {
        // critical symbols are not in the normalizer's set
        let split = self.punctuation.split_adjacent(normalized);
        strip_editorial_markup(&split)
            .split_whitespace()
            .filter_map(|raw| {
                let token = grave_to_acute(self.punctuation.strip(raw));
                (!token.is_empty()).then_some(token)
            })
            .collect()
    }

    /// Lemma stream of normalized text, in token order, duplicates kept.
    ///
    /// # Errors
    /// [`Error::LemmatizerContract`] if the lemmatizer returns a different
    /// number of pairs than it was given tokens.
    pub fn lemmatize(&self, normalized: &str) -> Result<Vec<String>> {
        let tokens = self.tokenize(normalized);
        let pairs = self.lemmatizer.lemmatize(&tokens);
        if pairs.len() != tokens.len() {
            return Err(Error::LemmatizerContract {
                expected: tokens.len(),
                actual: pairs.len(),
            });
        }

        let lemmas: Vec<String> = pairs
            .into_iter()
            .filter_map(|(_, lemma)| {
                let lemma = lemma.to_lowercase();
                if STRUCTURAL_LEMMAS.contains(&lemma.as_str()) {
                    return None;
                }
                // the lemmatizer leaves elided δ' unresolved
                if lemma == "δ" {
                    return Some("δέ".to_string());
                }
                Some(lemma)
            })
            .collect();
        debug!(tokens = tokens.len(), lemmas = lemmas.len(), "lemmatized text");
        Ok(lemmas)
    }
}
