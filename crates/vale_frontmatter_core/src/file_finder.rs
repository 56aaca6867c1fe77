use crate::FrontmatterError;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Expands file patterns into the documents to lint.
///
/// Globs follow shell conventions: `*` and `?` never cross a `/`, only `**`
/// spans directories, and hidden files and directories are only matched by
/// patterns that name a hidden component themselves.
pub struct FileFinder {
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(exclude: &[String]) -> Result<Self, FrontmatterError> {
        let exclude_globs = Self::build_globset(exclude)?;

        Ok(Self { exclude_globs })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, FrontmatterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(glob(pattern)?);
        }

        let globset = builder
            .build()
            .map_err(|e| FrontmatterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a file path should be ignored based on exclude patterns.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
    }

    /// Returns the files matched by `patterns`, relative to `base_dir` where
    /// possible, in expansion order and without duplicates.
    ///
    /// A pattern naming an existing file is taken literally. Every other
    /// pattern is a glob matched against paths relative to `base_dir`; the
    /// files it matches are appended in directory-walk order, which is sorted
    /// by file name.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, FrontmatterError> {
        let mut expansions = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let path = base_dir.join(pattern);
            if path
                .symlink_metadata()
                .is_ok_and(|m| m.file_type().is_file())
            {
                expansions.push(Expansion::Literal(relative_to(&path, base_dir)));
            } else {
                expansions.push(Expansion::Glob {
                    matcher: glob(pattern)?.compile_matcher(),
                    hidden: names_hidden(Path::new(pattern)),
                });
            }
        }

        let has_globs = expansions
            .iter()
            .any(|e| matches!(e, Expansion::Glob { .. }));
        let candidates = if has_globs {
            let walk_hidden = expansions
                .iter()
                .any(|e| matches!(e, Expansion::Glob { hidden: true, .. }));
            walk(base_dir, walk_hidden)
        } else {
            Vec::new()
        };

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        let mut push = |file: &PathBuf| {
            if !self.should_ignore(file) && seen.insert(file.clone()) {
                files.push(file.clone());
            }
        };

        for expansion in &expansions {
            match expansion {
                Expansion::Literal(file) => push(file),
                Expansion::Glob { matcher, hidden } => {
                    for file in &candidates {
                        if matcher.is_match(file) && (*hidden || !names_hidden(file)) {
                            push(file);
                        }
                    }
                }
            }
        }

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

enum Expansion {
    Literal(PathBuf),
    Glob { matcher: GlobMatcher, hidden: bool },
}

fn glob(pattern: &str) -> Result<Glob, FrontmatterError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| FrontmatterError::config(format!("Invalid pattern '{}': {}", pattern, e)))
}

/// Files under `base_dir`, relative to it, in file-name order.
fn walk(base_dir: &Path, walk_hidden: bool) -> Vec<PathBuf> {
    WalkDir::new(base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            walk_hidden
                || entry.depth() == 0
                || !entry.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| relative_to(entry.path(), base_dir))
        .collect()
}

/// Whether any component of `path` is hidden (starts with a dot).
fn names_hidden(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(part) => part.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Strips `base_dir` from `path`, falling back to the path itself.
fn relative_to(path: &Path, base_dir: &Path) -> PathBuf {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    relative
        .strip_prefix(".")
        .unwrap_or(relative)
        .to_path_buf()
}
