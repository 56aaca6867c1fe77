//! Temporary store for projections.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::FrontmatterError;
use crate::projection::Projection;

/// Name of the directory grouping cache roots under the base directory.
pub const TOOL_NAME: &str = "vale-frontmatter";

/// Holds the projections of one invocation.
///
/// The cache root is `<base>/vale-frontmatter/<pid>-<random>`, unique per
/// invocation. Each projection is stored under the original file's path
/// relative to the working directory. The root is removed by [`cleanup`], or
/// when the cache is dropped. The shared `vale-frontmatter` directory is left
/// in place, since concurrent invocations create their roots inside it.
///
/// [`cleanup`]: ProjectionCache::cleanup
pub struct ProjectionCache {
    dir: TempDir,
}

impl ProjectionCache {
    /// Creates a fresh cache root under `base_dir`.
    pub fn create(base_dir: impl AsRef<Path>) -> Result<Self, FrontmatterError> {
        let parent = base_dir.as_ref().join(TOOL_NAME);
        fs::create_dir_all(&parent).map_err(|e| {
            FrontmatterError::cache(format!("Failed to create {}: {}", parent.display(), e))
        })?;

        let prefix = format!("{}-", std::process::id());
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(&parent)
            .map_err(|e| {
                FrontmatterError::cache(format!(
                    "Failed to create cache root in {}: {}",
                    parent.display(),
                    e
                ))
            })?;

        debug!("Created cache root {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Absolute path of the cache root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path at which the projection of `relative` is stored.
    ///
    /// Paths that would escape the cache root (absolute paths, `..`) are
    /// rejected.
    pub fn entry_path(&self, relative: &Path) -> Result<PathBuf, FrontmatterError> {
        let mut entry = self.root().to_path_buf();
        let mut depth = 0;

        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    entry.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                _ => {
                    return Err(FrontmatterError::cache(format!(
                        "{} is outside the working directory",
                        relative.display()
                    )));
                }
            }
        }

        if depth == 0 {
            return Err(FrontmatterError::cache("Empty document path"));
        }

        Ok(entry)
    }

    /// Writes `projection` for the document at `relative`, replacing any
    /// previous projection of the same document.
    pub fn store(
        &self,
        relative: &Path,
        projection: &Projection,
    ) -> Result<PathBuf, FrontmatterError> {
        let entry = self.entry_path(relative)?;

        if let Some(dir) = entry.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                FrontmatterError::cache(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        fs::write(&entry, projection.to_text()).map_err(|e| {
            FrontmatterError::cache(format!("Failed to write {}: {}", entry.display(), e))
        })?;

        debug!("Stored projection of {} at {}", relative.display(), entry.display());
        Ok(entry)
    }

    /// Removes the cache root.
    pub fn cleanup(self) -> Result<(), FrontmatterError> {
        let root = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            FrontmatterError::cache(format!("Failed to remove {}: {}", root.display(), e))
        })?;

        debug!("Removed cache root {}", root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_document;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn projection(text: &str) -> Projection {
        project_document(Path::new("doc.md"), text).unwrap().unwrap()
    }

    #[test]
    fn test_root_is_under_tool_directory() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();

        assert!(cache.root().is_dir());
        assert_eq!(cache.root().parent(), Some(base.path().join(TOOL_NAME).as_path()));
        let name = cache.root().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&format!("{}-", std::process::id())));
    }

    #[test]
    fn test_roots_are_unique_per_invocation() {
        let base = tempdir().unwrap();
        let first = ProjectionCache::create(base.path()).unwrap();
        let second = ProjectionCache::create(base.path()).unwrap();
        assert_ne!(first.root(), second.root());
    }

    #[test]
    fn test_store_mirrors_relative_path() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();

        let stored = cache
            .store(
                Path::new("docs/guide/intro.md"),
                &projection("---\ntitle: Intro\n---\n"),
            )
            .unwrap();

        assert_eq!(stored, cache.root().join("docs/guide/intro.md"));
        assert_eq!(fs::read_to_string(&stored).unwrap(), "\n# Intro\n\n");
    }

    #[test]
    fn test_store_skips_current_dir_components() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();
        let entry = cache.entry_path(Path::new("./a.md")).unwrap();
        assert_eq!(entry, cache.root().join("a.md"));
    }

    #[test]
    fn test_store_overwrites_previous_projection() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();
        let path = Path::new("a.md");

        cache.store(path, &projection("---\ntitle: First\n---\n")).unwrap();
        let stored = cache.store(path, &projection("---\ntitle: Second\n---\n")).unwrap();

        assert_eq!(fs::read_to_string(stored).unwrap(), "\n# Second\n\n");
    }

    #[test]
    fn test_rejects_paths_escaping_root() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();

        assert!(cache.entry_path(Path::new("../outside.md")).is_err());
        assert!(cache.entry_path(Path::new("/etc/outside.md")).is_err());
        assert!(cache.entry_path(Path::new("")).is_err());
    }

    #[test]
    fn test_cleanup_removes_root() {
        let base = tempdir().unwrap();
        let cache = ProjectionCache::create(base.path()).unwrap();
        cache
            .store(Path::new("nested/a.md"), &projection("---\ntitle: A\n---\n"))
            .unwrap();
        let root = cache.root().to_path_buf();

        cache.cleanup().unwrap();

        assert!(!root.exists());
        assert_eq!(fs::read_dir(base.path().join(TOOL_NAME)).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_keeps_shared_directory_for_other_runs() {
        let base = tempdir().unwrap();
        let shared = base.path().join(TOOL_NAME);

        // A second run has already created the shared directory and is about
        // to create its root inside it.
        let first = ProjectionCache::create(base.path()).unwrap();
        fs::create_dir_all(&shared).unwrap();
        first.cleanup().unwrap();

        assert!(shared.is_dir());
        let root = tempfile::Builder::new().tempdir_in(&shared).unwrap();
        assert!(root.path().is_dir());
    }

    #[test]
    fn test_cleanup_keeps_sibling_roots() {
        let base = tempdir().unwrap();
        let first = ProjectionCache::create(base.path()).unwrap();
        let second = ProjectionCache::create(base.path()).unwrap();

        first.cleanup().unwrap();

        assert!(second.root().is_dir());
    }

    #[test]
    fn test_drop_removes_root() {
        let base = tempdir().unwrap();
        let root = {
            let cache = ProjectionCache::create(base.path()).unwrap();
            cache.root().to_path_buf()
        };
        assert!(!root.exists());
    }
}
