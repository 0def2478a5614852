//! Text preparation: raw document text to lemma streams.
pub mod lemma;
pub mod normalizer;
pub mod punctuation;
