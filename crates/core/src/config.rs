//! Search tuning loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Stop with `SearchOutcome::BudgetExhausted` once this many nodes have been
    /// expanded. `None` searches until a path is found or the open set is empty.
    pub max_expansions: Option<u32>,
}

impl SearchConfig {
    pub fn with_max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::Invalid("max_expansions must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_is_unbounded() {
        let config = SearchConfig::from_toml_str("").expect("parse");
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_expansions, None);
    }

    #[test]
    fn parses_expansion_budget() {
        let config = SearchConfig::from_toml_str("max_expansions = 250\n").expect("parse");
        assert_eq!(config.max_expansions, Some(250));
    }

    #[test]
    fn rejects_zero_budget() {
        let err = SearchConfig::from_toml_str("max_expansions = 0").expect_err("zero budget");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SearchConfig::from_toml_str("diagonal = true").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("search.toml");
        fs::write(&path, "max_expansions = 12\n").expect("write");

        let config = SearchConfig::load(&path).expect("load");
        assert_eq!(config, SearchConfig::default().with_max_expansions(12));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = SearchConfig::load(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
