//! Error types for a TF-IDF analysis run.
//!
//! Every stage that can fail returns [`Result`]. Failures abort the current
//! run; nothing is retried.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while building or scoring a term table.
#[derive(Error, Debug)]
pub enum Error {
    /// A source path is missing or could not be read.
    #[error("input error at {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The analysis unit produced no lemma after normalization.
    #[error("analysis unit is empty: no tokens survived normalization")]
    EmptyAnalysis,

    /// The reference corpus holds no document, so idf is undefined.
    #[error("reference corpus is empty: document count must be at least 1")]
    EmptyCorpus,

    /// The lemmatizer returned a different number of pairs than tokens it was given.
    #[error("lemmatizer returned {actual} pairs for {expected} tokens")]
    LemmatizerContract { expected: usize, actual: usize },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O failure with the path that caused it.
    pub fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Input {
            path: path.into(),
            source,
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
