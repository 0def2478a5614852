use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::punctuation::PunctuationSet;

/// Characters removed before any other step:
/// directional marks, byte-order mark and bullet.
pub const ODD_PUNCTUATION: [char; 4] = ['\u{200E}', '\u{200F}', '\u{FEFF}', '•'];

/// Quotation glyphs folded to a plain apostrophe
pub const QUOTE_LOOKALIKES: [char; 2] = ['«', '»'];

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));
static LINE_INDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s+").expect("valid regex"));

/// Language-specific orthographic normalization.
///
/// Implementations must be pure and idempotent.
pub trait OrthographicNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Unicode compatibility composition (NFKC).
///
/// For polytonic Greek this folds oxia vowels onto their tonos forms,
/// ano teleia onto the middle dot and the Greek question mark onto `;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeComposition;

impl OrthographicNormalizer for UnicodeComposition {
    fn normalize(&self, text: &str) -> String {
        text.nfkc().collect()
    }
}

/// Turns raw document text into a string that splits cleanly on whitespace.
#[derive(Debug, Clone)]
pub struct Normalizer<O = UnicodeComposition>
where
    O: OrthographicNormalizer,
{
    orthography: O,
    punctuation: PunctuationSet,
}

impl Normalizer<UnicodeComposition> {
    pub fn new() -> Self {
        Self::with_orthography(UnicodeComposition)
    }
}

impl Default for Normalizer<UnicodeComposition> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Normalizer<O>
where
    O: OrthographicNormalizer,
{
    pub fn with_orthography(orthography: O) -> Self {
        Self {
            orthography,
            punctuation: PunctuationSet::ascii(),
        }
    }

    /// Replace the punctuation set used for splitting (ASCII by default)
    pub fn punctuation(mut self, punctuation: PunctuationSet) -> Self {
        self.punctuation = punctuation;
        self
    }

    /// Normalize raw text.
    ///
    /// Orthography before punctuation, whitespace last so blank lines
    /// left behind by removed characters are cleaned too.
    /// `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, raw: &str) -> String {
        // before composition, or a mark between base and accent blocks it
        let raw: String = raw.chars().filter(|c| !ODD_PUNCTUATION.contains(c)).collect();
        let text = self.orthography.normalize(&raw);

        let text: String = text
            .chars()
            .map(|c| if QUOTE_LOOKALIKES.contains(&c) { '\'' } else { c })
            .collect();
        let text = self.punctuation.split_adjacent(&text);

        collapse_whitespace(&text)
    }
}

/// One space per run of spaces, one newline per run of newlines,
/// no leading whitespace on any line.
pub fn collapse_whitespace(text: &str) -> String {
    let text = SPACE_RUNS.replace_all(text, " ");
    let text = NEWLINE_RUNS.replace_all(&text, "\n");
    LINE_INDENT.replace_all(&text, "").into_owned()
}
