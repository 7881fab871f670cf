//! Parser configuration.

use std::path::Path;

use serde::Deserialize;

/// Lines starting with any of these are statement boilerplate.
const DEFAULT_IGNORE_PREFIXES: &[&str] = &[
    "* Adjustments to past fares",
    "Some journeys were cheaper or free today",
    "We have no record of where you touched",
    "Page",
    "cap.",
    "We have auto completed",
];

/// Errors loading a parser configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for statement parsing.
///
/// The set of boilerplate prefixes is data rather than code, so new
/// statement notices can be skipped without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines starting with any of these prefixes are dropped before
    /// classification.
    pub ignore_prefixes: Vec<String>,
}

impl ParserConfig {
    /// Create a configuration with the given ignorable prefixes.
    pub fn new<I, S>(ignore_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_prefixes: ignore_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a configuration from JSON.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns true if the line starts with a known boilerplate prefix.
    pub fn is_ignorable(&self, line: &str) -> bool {
        self.ignore_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_PREFIXES.iter().copied())
    }
}
