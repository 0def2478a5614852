use std::collections::HashSet;

use ahash::RandomState;

/// Set of characters treated as punctuation when splitting and cleaning tokens.
///
/// # Examples
/// ```
/// use lemma_tf_idf::text::punctuation::PunctuationSet;
/// let punct = PunctuationSet::ascii().with_extra("·");
/// assert!(punct.contains('·'));
/// assert_eq!(punct.split_adjacent("λόγος·καί"), "λόγος · καί");
/// ```
#[derive(Debug, Clone)]
pub struct PunctuationSet {
    chars: HashSet<char, RandomState>,
}

impl PunctuationSet {
    /// ASCII punctuation, the same 32 characters as `char::is_ascii_punctuation`
    pub fn ascii() -> Self {
        let chars = (0u8..=0x7f)
            .map(char::from)
            .filter(char::is_ascii_punctuation)
            .collect();
        Self { chars }
    }

    /// ASCII punctuation plus the given extra characters
    pub fn statistics(extra: &str) -> Self {
        Self::ascii().with_extra(extra)
    }

    pub fn with_extra(mut self, extra: &str) -> Self {
        self.chars.extend(extra.chars());
        self
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    fn is_word(&self, c: char) -> bool {
        !self.contains(c) && (c.is_alphanumeric() || unicode_normalization::char::is_combining_mark(c))
    }

    /// Insert a space between punctuation and the word it is glued to,
    /// on either side ("οὕτως:" -> "οὕτως :", "(καί" -> "( καί").
    ///
    /// A second pass over the output changes nothing.
    pub fn split_adjacent(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                let trailing = self.is_word(p) && self.contains(c);
                // combining marks stay with whatever precedes them
                let leading = self.contains(p) && !self.contains(c) && c.is_alphanumeric();
                if trailing || leading {
                    out.push(' ');
                }
            }
            out.push(c);
            prev = Some(c);
        }
        out
    }

    /// Strip leading and trailing punctuation from a single token
    #[inline]
    pub fn strip<'a>(&self, token: &'a str) -> &'a str {
        token.trim_matches(|c: char| self.contains(c))
    }
}

impl Default for PunctuationSet {
    fn default() -> Self {
        Self::ascii()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_set_has_all_ascii_punctuation() {
        let punct = PunctuationSet::ascii();
        assert_eq!(punct.len(), 32);
        for c in "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~".chars() {
            assert!(punct.contains(c), "missing {c:?}");
        }
        assert!(!punct.contains('·'));
        assert!(!punct.contains('α'));
    }

    #[test]
    fn statistics_set_unions_critical_symbols() {
        let punct = PunctuationSet::statistics("·«»⟦⟧…");
        for c in "·«»⟦⟧….,".chars() {
            assert!(punct.contains(c));
        }
    }

    #[test]
    fn splits_trailing_and_leading_punctuation() {
        let punct = PunctuationSet::ascii();
        assert_eq!(punct.split_adjacent("οὕτως: (καί)"), "οὕτως : ( καί )");
        assert_eq!(punct.split_adjacent("a.b"), "a . b");
    }

    #[test]
    fn split_is_a_fixed_point() {
        let punct = PunctuationSet::ascii();
        let once = punct.split_adjacent("ἀρχή,τέλος.(μέσον)'x'");
        assert_eq!(punct.split_adjacent(&once), once);
    }

    #[test]
    fn leaves_runs_of_punctuation_together() {
        let punct = PunctuationSet::ascii();
        assert_eq!(punct.split_adjacent("τί;!"), "τί ;!");
    }

    #[test]
    fn strip_only_touches_edges() {
        let punct = PunctuationSet::statistics("«»");
        assert_eq!(punct.strip("«λόγος»,"), "λόγος");
        assert_eq!(punct.strip("δ'ἄρα"), "δ'ἄρα");
        assert_eq!(punct.strip("..."), "");
    }
}
