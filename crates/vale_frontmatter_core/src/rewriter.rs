//! Maps linter output back onto the original documents.

use std::path::{MAIN_SEPARATOR, Path};

use regex::bytes::{NoExpand, Regex};

use crate::FrontmatterError;

/// Removes every occurrence of `<root><separator>` from `output`.
///
/// Diagnostics then name the original relative paths. Everything else,
/// including line and column numbers and bytes that are not valid UTF-8, is
/// passed through unchanged. When the canonical form of `root` differs (a
/// symlinked temporary directory, for example), that prefix is removed too.
pub fn rewrite_output(output: &[u8], root: &Path) -> Result<Vec<u8>, FrontmatterError> {
    let mut rewritten = strip(output, root)?;

    if let Ok(canonical) = root.canonicalize()
        && canonical != root
    {
        rewritten = strip(&rewritten, &canonical)?;
    }

    Ok(rewritten)
}

fn strip(output: &[u8], root: &Path) -> Result<Vec<u8>, FrontmatterError> {
    let prefix = format!("{}{}", root.display(), MAIN_SEPARATOR);
    let pattern = Regex::new(&regex::escape(&prefix)).map_err(|e| {
        FrontmatterError::cache(format!("Invalid cache root {}: {}", root.display(), e))
    })?;

    Ok(pattern.replace_all(output, NoExpand(b"")).into_owned())
}
