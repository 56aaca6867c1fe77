//! Front matter lint orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::cache::ProjectionCache;
use crate::file_finder::FileFinder;
use crate::invoker::LintInvoker;
use crate::projection::project_document;
use crate::rewriter::rewrite_output;
use crate::{FrontmatterError, LintConfig};

/// Outcome of a lint run.
#[derive(Debug, Default)]
pub struct LintReport {
    /// Exit status of the linter, or 0 when it was not run.
    pub status: i32,
    /// Linter output with cache-root prefixes removed.
    pub output: Vec<u8>,
    /// Files handed to the linter.
    pub processed: Vec<PathBuf>,
    /// Files excluded because of a per-file error.
    pub failures: Vec<(PathBuf, FrontmatterError)>,
}

impl LintReport {
    /// Whether the linter was run at all.
    pub fn linted(&self) -> bool {
        !self.processed.is_empty()
    }
}

/// Drives pattern expansion, projection, linting and cleanup.
///
/// Files are processed one at a time in expansion order.
pub struct FrontmatterLinter {
    config: LintConfig,
    base_dir: PathBuf,
    verbose: bool,
}

impl FrontmatterLinter {
    /// Creates a linter rooted at `base_dir`, the directory that patterns and
    /// reported paths are relative to.
    pub fn new(config: LintConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            verbose: false,
        }
    }

    /// Emits the "nothing to lint" warning.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lints the front matter of every file matched by `patterns`, falling
    /// back to the configured patterns when none are given.
    ///
    /// The cache root is removed before returning, whatever the outcome.
    pub fn lint_patterns(&self, patterns: &[String]) -> Result<LintReport, FrontmatterError> {
        let patterns = if patterns.is_empty() {
            self.config.patterns.as_slice()
        } else {
            patterns
        };

        let finder = FileFinder::new(&self.config.exclude)?;
        let files = finder.discover_files(patterns, &self.base_dir)?;

        let cache = ProjectionCache::create(self.config.cache_base())?;
        let result = self.lint_files(&cache, &files);

        if let Err(e) = cache.cleanup() {
            warn!("{}", e);
        }

        result
    }

    fn lint_files(
        &self,
        cache: &ProjectionCache,
        files: &[PathBuf],
    ) -> Result<LintReport, FrontmatterError> {
        let mut report = LintReport::default();

        for file in files {
            match self.prepare_file(cache, file) {
                Ok(Some(_)) => {
                    info!(
                        "Processed: {} -> Preserving original line numbers",
                        file.display()
                    );
                    report.processed.push(file.clone());
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Error processing {}: {}", file.display(), e);
                    report.failures.push((file.clone(), e));
                }
            }
        }

        if !report.linted() {
            if self.verbose {
                warn!("No files with frontmatter found matching the patterns");
            }
            return Ok(report);
        }

        let invoker = LintInvoker::new(&self.config.linter)
            .with_args(self.config.args.clone())
            .with_timeout(self.config.timeout_duration());
        let output = invoker.run(self.config.filter.as_deref(), cache.root())?;

        report.status = output.status;
        report.output = rewrite_output(&output.stdout, cache.root())?;
        Ok(report)
    }

    /// Projects one file into the cache.
    ///
    /// Returns the stored projection's path, or `None` when the file has
    /// nothing to lint.
    pub fn prepare_file(
        &self,
        cache: &ProjectionCache,
        file: &Path,
    ) -> Result<Option<PathBuf>, FrontmatterError> {
        let content = fs::read_to_string(self.base_dir.join(file))?;

        let Some(projection) = project_document(file, &content)? else {
            return Ok(None);
        };

        cache.store(file, &projection).map(Some)
    }
}
