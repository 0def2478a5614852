use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Symbols used by critical editions that count as punctuation on the
/// statistics path, on top of ASCII punctuation.
pub const CRITICAL_PUNCTUATION: &str = "·«»⟦⟧…";

/// tf-idf given to a term no reference document contains
pub const DEFAULT_ZERO_DF_SENTINEL: f64 = 10_000.0;

pub const DEFAULT_TOP_N: usize = 50;

/// Settings for one analysis run.
///
/// Every field has a default, so a config file only needs the keys it overrides.
///
/// # Examples
/// ```
/// use lemma_tf_idf::AnalysisConfig;
/// let config = AnalysisConfig::from_json_str(r#"{ "top_n": 20 }"#).unwrap();
/// assert_eq!(config.top_n, 20);
/// assert_eq!(config.zero_df_sentinel, 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Extra characters unioned with ASCII punctuation when cleaning tokens
    pub punctuation_extra: String,
    /// tf-idf assigned to terms with document frequency 0
    pub zero_df_sentinel: f64,
    /// Number of ranked terms shown by report views
    pub top_n: usize,
    /// Process reference documents on the rayon pool
    pub parallel: bool,
    /// Extension (without dot) of the text files picked up from a directory
    pub file_extension: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            punctuation_extra: CRITICAL_PUNCTUATION.to_string(),
            zero_df_sentinel: DEFAULT_ZERO_DF_SENTINEL,
            top_n: DEFAULT_TOP_N,
            parallel: true,
            file_extension: "txt".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if !self.zero_df_sentinel.is_finite() {
            return Err(Error::config("zero_df_sentinel must be finite"));
        }
        if self.file_extension.is_empty() {
            return Err(Error::config("file_extension must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.zero_df_sentinel, 10_000.0);
        assert_eq!(config.top_n, 50);
        assert_eq!(config.punctuation_extra, "·«»⟦⟧…");
        assert_eq!(config.file_extension, "txt");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = AnalysisConfig::from_json_str(r#"{"parallel": false, "zero_df_sentinel": 500.0}"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.zero_df_sentinel, 500.0);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = AnalysisConfig::from_json_str("{ top_n: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_extension_is_rejected() {
        let err = AnalysisConfig::from_json_str(r#"{"file_extension": ""}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"top_n": 7}"#).unwrap();
        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.top_n, 7);
    }
}
