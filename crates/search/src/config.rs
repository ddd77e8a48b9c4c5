//! Engine configuration and TOML loading.
//!
//! ```toml
//! [search]
//! max_results = 10
//! fuzzy_threshold = 0.6
//! enable_ngram = true
//! enable_semantic = true
//! ```

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Results returned when `max_results` is unset or zero.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Similarity a fuzzy word match needs when unset.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results per query
    pub max_results: usize,

    /// Minimum word similarity (0 to 1) for fuzzy matches
    pub fuzzy_threshold: f64,

    /// Also score words by bigram overlap during fuzzy matching
    pub enable_ngram: bool,

    /// Fall back to root matching when nothing else matched
    pub enable_semantic: bool,

    /// Accepted for compatibility with older config files; has no effect
    pub enable_phonetic: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            enable_ngram: true,
            enable_semantic: true,
            enable_phonetic: true,
        }
    }
}

/// Root of the config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    search: SearchConfig,
}

impl SearchConfig {
    /// Parse the `[search]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.search)
    }

    /// Load configuration from a file path or use defaults.
    ///
    /// Without an explicit path, the standard locations are tried in order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        match config_path {
            Some(p) => {
                debug!(path = %p.display(), "Loading search configuration");
                let content =
                    std::fs::read_to_string(&p).map_err(|e| SearchError::io(&p, e))?;
                Self::from_toml_str(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replace out-of-range values with safe ones.
    ///
    /// A zero `max_results` becomes the default, a NaN threshold becomes the
    /// default and any other threshold is clamped to `[0, 1]`.
    pub fn sanitized(mut self) -> Self {
        if self.max_results == 0 {
            warn!(default = DEFAULT_MAX_RESULTS, "max_results must be positive, using default");
            self.max_results = DEFAULT_MAX_RESULTS;
        }

        if self.fuzzy_threshold.is_nan() {
            warn!(default = DEFAULT_FUZZY_THRESHOLD, "fuzzy_threshold is NaN, using default");
            self.fuzzy_threshold = DEFAULT_FUZZY_THRESHOLD;
        } else if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            let clamped = self.fuzzy_threshold.clamp(0.0, 1.0);
            warn!(
                value = self.fuzzy_threshold,
                clamped, "fuzzy_threshold outside [0, 1], clamping"
            );
            self.fuzzy_threshold = clamped;
        }

        self
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        "catalog-search.toml",
        ".catalog-search.toml",
        ".config/catalog-search.toml",
    ];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.fuzzy_threshold, 0.6);
        assert!(config.enable_ngram);
        assert!(config.enable_semantic);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SearchConfig::from_toml_str("[search]\nmax_results = 3\n").unwrap();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.fuzzy_threshold, 0.6);
        assert!(config.enable_semantic);
    }

    #[test]
    fn test_missing_table_is_default() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_wrong_type_is_error() {
        let err = SearchConfig::from_toml_str("[search]\nmax_results = \"ten\"\n").unwrap_err();
        assert!(matches!(err, SearchError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\nfuzzy_threshold = 0.8\nenable_semantic = false").unwrap();

        let config = SearchConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fuzzy_threshold, 0.8);
        assert!(!config.enable_semantic);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SearchConfig::load(Some(Path::new("/nonexistent/catalog-search.toml")))
            .unwrap_err();
        assert!(matches!(err, SearchError::Io { .. }));
    }

    #[test]
    fn test_sanitized_fixes_out_of_range() {
        let config = SearchConfig {
            max_results: 0,
            fuzzy_threshold: 1.7,
            ..SearchConfig::default()
        }
        .sanitized();
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.fuzzy_threshold, 1.0);

        let config = SearchConfig {
            fuzzy_threshold: -0.5,
            ..SearchConfig::default()
        }
        .sanitized();
        assert_eq!(config.fuzzy_threshold, 0.0);

        let config = SearchConfig {
            fuzzy_threshold: f64::NAN,
            ..SearchConfig::default()
        }
        .sanitized();
        assert_eq!(config.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
    }

    #[test]
    fn test_sanitized_leaves_valid_config_alone() {
        let config = SearchConfig {
            max_results: 5,
            fuzzy_threshold: 0.75,
            ..SearchConfig::default()
        };
        assert_eq!(config.clone().sanitized(), config);
    }
}
