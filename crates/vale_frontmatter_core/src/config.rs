//! Linter configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::FrontmatterError;

/// Configuration for a front matter lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LintConfig {
    /// External linter program.
    #[serde(default = "default_linter")]
    pub linter: String,

    /// Extra arguments passed to the linter before the filter and cache root.
    #[serde(default)]
    pub args: Vec<String>,

    /// Filter expression forwarded to the linter.
    #[serde(default)]
    pub filter: Option<String>,

    /// Patterns linted when none are given on the command line.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// File patterns never linted.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Linter time limit in seconds. `null` waits indefinitely.
    #[serde(default = "default_timeout")]
    pub timeout: Option<u64>,

    /// Directory holding the cache root instead of the system temporary
    /// directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_linter() -> String {
    "vale".to_string()
}

fn default_patterns() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

fn default_timeout() -> Option<u64> {
    Some(300)
}

impl LintConfig {
    /// Configuration file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] =
        &[".vale-frontmatter.jsonc", ".vale-frontmatter.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            linter: default_linter(),
            args: Vec::new(),
            filter: None,
            patterns: default_patterns(),
            exclude: Vec::new(),
            timeout: default_timeout(),
            cache_dir: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FrontmatterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FrontmatterError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_jsonc(&content)
    }

    /// Parses configuration from JSON with comments.
    pub fn from_jsonc(content: &str) -> Result<Self, FrontmatterError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| FrontmatterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| FrontmatterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds a configuration file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Linter time limit, if any.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Directory under which the cache root is created.
    pub fn cache_base(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::new()
    }
}
