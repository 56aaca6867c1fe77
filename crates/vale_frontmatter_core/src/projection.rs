//! Line-preserving projection of front matter into lintable text.
//!
//! A projection replaces the front matter block with blank lines, except for
//! the lines that declare prose fields, which carry the field's text. Because
//! the projection has exactly as many lines as the block (plus one trailing
//! blank line), a diagnostic reported against the projection points at the
//! same line in the original document.
//!
//! ```text
//! ---                     |
//! title: Helo world       | # Helo world
//! ---                     |
//! Body.                   |
//! ```

use std::path::Path;

use tracing::debug;

use crate::FrontmatterError;
use crate::frontmatter::{self, MetadataBlock};
use crate::key_index::KeyLineIndex;

/// Field rendered as a heading.
pub const TITLE_FIELD: &str = "title";
/// Prose field, preferred over [`SUMMARY_FIELD`].
pub const DESCRIPTION_FIELD: &str = "description";
/// Prose field, used only when no description is substituted.
pub const SUMMARY_FIELD: &str = "summary";

const HEADING_MARKER: &str = "#";

/// Lintable replacement text for a document's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    lines: Vec<String>,
}

impl Projection {
    /// Builds the projection of `block`.
    ///
    /// The title, when declared and indexed, becomes a heading on its own
    /// line. The description is substituted on its line, or failing that the
    /// summary; never both. All other lines are blank.
    pub fn build(block: &MetadataBlock, index: &KeyLineIndex) -> Self {
        // Lines are in document coordinates. Front matter always opens the
        // document, so this is the block length plus the trailing line.
        let mut lines = vec![String::new(); block.end_line() + 2];

        if let Some((line, title)) = substitution(block, index, TITLE_FIELD) {
            lines[line] = format!("{HEADING_MARKER} {title}");
        }

        let prose = substitution(block, index, DESCRIPTION_FIELD)
            .or_else(|| substitution(block, index, SUMMARY_FIELD));
        if let Some((line, text)) = prose {
            lines[line] = text;
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when no line carries any text.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Text written to the projection cache.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Resolves the line and single-line text of a whitelisted field.
fn substitution(
    block: &MetadataBlock,
    index: &KeyLineIndex,
    key: &str,
) -> Option<(usize, String)> {
    let text = block.text_field(key)?;
    let line = index.line_of(key)?;

    if text.contains('\n') {
        debug!("Skipping multi-line `{}` declared on line {}", key, line + 1);
        return None;
    }

    Some((line, text))
}

/// Projects the front matter of a document.
///
/// Returns `Ok(None)` when the document has no front matter, declares no
/// fields, or has nothing to lint once projected.
pub fn project_document(path: &Path, text: &str) -> Result<Option<Projection>, FrontmatterError> {
    let lines = frontmatter::split_lines(text);

    let Some(block) = frontmatter::locate(path, &lines)? else {
        return Ok(None);
    };

    let index = KeyLineIndex::build(&lines, block.span());
    let projection = Projection::build(&block, &index);

    if projection.is_blank() {
        debug!("No lintable front matter in {}", path.display());
        return Ok(None);
    }

    Ok(Some(projection))
}
