//! Error types for the front matter linter.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while projecting front matter or running the linter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Configuration error (config file, glob patterns).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The front matter of a document could not be parsed.
    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A projection could not be written to, or removed from, the cache root.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The external linter could not be started.
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external linter did not finish within the configured limit.
    #[error("Linter timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The external linter exited without a status code (killed by a signal).
    #[error("Linter was terminated before reporting an exit status")]
    Terminated,

    /// The run was interrupted by the user.
    #[error("Interrupted")]
    Interrupted,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrontmatterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error for the document at `path`.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }
}
