//! Front matter location and parsing.
//!
//! Front matter is the metadata block at the top of a markdown file, bounded
//! by two lines whose trimmed content is `---`:
//!
//! ```markdown
//! ---
//! title: My Document
//! description: What this document is about
//! ---
//!
//! # Document Content
//! ```
//!
//! Only the first two delimiter lines are considered. Anything after the
//! closing delimiter is never scanned for further blocks.

use std::ops::Range;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::FrontmatterError;

/// Delimiter token that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

const BOM: char = '\u{feff}';

/// Line span of a front matter block, delimiter lines included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterSpan {
    /// Zero-based index of the opening delimiter line.
    pub start_line: usize,
    /// Zero-based index of the closing delimiter line.
    pub end_line: usize,
}

impl DelimiterSpan {
    /// Number of lines in the block, both delimiters included.
    pub fn len(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// A span always contains its two delimiter lines.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Line indices strictly between the delimiters.
    pub fn interior(&self) -> Range<usize> {
        self.start_line + 1..self.end_line
    }
}

/// A located and parsed front matter block.
#[derive(Debug, Clone)]
pub struct MetadataBlock {
    span: DelimiterSpan,
    fields: Mapping,
}

impl MetadataBlock {
    pub fn span(&self) -> DelimiterSpan {
        self.span
    }

    pub fn start_line(&self) -> usize {
        self.span.start_line
    }

    pub fn end_line(&self) -> usize {
        self.span.end_line
    }

    /// Parsed top-level fields.
    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    /// Returns the textual value of a field.
    ///
    /// Strings are returned verbatim without trailing line breaks; non-zero
    /// numbers and `true` use their YAML rendering. Empty strings, zero, NaN,
    /// `false`, null, sequences and mappings have no text and yield `None`.
    pub fn text_field(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_text)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let text = s.trim_end_matches(['\r', '\n']);
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(n) => {
            let zero_or_nan = n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan());
            (!zero_or_nan).then(|| n.to_string())
        }
        Value::Bool(true) => Some("true".to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Splits document text into lines, dropping a leading byte order mark.
///
/// Lines keep any trailing `\r`; every comparison below trims first.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.strip_prefix(BOM).unwrap_or(text).split('\n').collect()
}

/// Finds the first two lines whose trimmed content is the delimiter.
pub fn locate_delimiters(lines: &[&str]) -> Option<DelimiterSpan> {
    let mut delimiters = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == DELIMITER)
        .map(|(index, _)| index);

    let start_line = delimiters.next()?;
    let end_line = delimiters.next()?;

    Some(DelimiterSpan {
        start_line,
        end_line,
    })
}

/// Parses the YAML between the delimiters of `span`.
///
/// A block that does not open the document is not front matter and yields no
/// fields, nor does empty YAML or YAML whose top level is not a mapping.
pub fn parse_fields(lines: &[&str], span: DelimiterSpan) -> Result<Mapping, serde_yaml::Error> {
    if span.start_line != 0 {
        debug!(
            "Delimiter on line {} does not open the document",
            span.start_line + 1
        );
        return Ok(Mapping::new());
    }

    let yaml = lines[span.interior()].join("\n");
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(&yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => {
            debug!("Front matter is not a mapping: {:?}", other);
            Ok(Mapping::new())
        }
    }
}

/// Locates and parses the front matter of a document.
///
/// Returns `Ok(None)` when the document has fewer than two delimiter lines or
/// when its front matter declares no fields.
pub fn locate(path: &Path, lines: &[&str]) -> Result<Option<MetadataBlock>, FrontmatterError> {
    let Some(span) = locate_delimiters(lines) else {
        return Ok(None);
    };

    let fields =
        parse_fields(lines, span).map_err(|e| FrontmatterError::parse(path, e.to_string()))?;

    if fields.is_empty() {
        return Ok(None);
    }

    Ok(Some(MetadataBlock { span, fields }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(text: &str) -> Option<MetadataBlock> {
        let lines = split_lines(text);
        locate(Path::new("doc.md"), &lines).unwrap()
    }

    #[test]
    fn test_locates_first_block() {
        let lines = split_lines("---\ntitle: Hello\n---\nBody\n---\nmore: x\n---\n");
        let span = locate_delimiters(&lines).unwrap();
        assert_eq!(
            span,
            DelimiterSpan {
                start_line: 0,
                end_line: 2
            }
        );
        assert_eq!(span.len(), 3);
        assert_eq!(span.interior(), 1..2);
    }

    #[test]
    fn test_delimiters_are_trimmed() {
        let lines = split_lines("---  \r\ntitle: Hello\r\n  ---\r\n");
        let span = locate_delimiters(&lines).unwrap();
        assert_eq!(span.end_line, 2);
    }

    #[rstest]
    #[case::no_delimiter("# Just markdown\n\nNo front matter.")]
    #[case::single_delimiter("---\ntitle: Unterminated\n")]
    #[case::longer_rule("----\ntitle: x\n----\n")]
    fn test_absent_without_two_delimiters(#[case] text: &str) {
        let lines = split_lines(text);
        assert!(locate_delimiters(&lines).is_none());
        assert!(block(text).is_none());
    }

    #[rstest]
    #[case::empty("---\n---\nBody")]
    #[case::blank_lines("---\n\n\n---\nBody")]
    #[case::scalar("---\njust some text\n---\nBody")]
    fn test_absent_without_fields(#[case] text: &str) {
        assert!(block(text).is_none());
    }

    #[test]
    fn test_thematic_breaks_in_body_are_not_front_matter() {
        let text = "# Heading\n\n---\ntitle: not metadata\n---\n";
        let lines = split_lines(text);
        assert!(locate_delimiters(&lines).is_some());
        assert!(block(text).is_none());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let block = block("\u{feff}---\ntitle: Hello\n---\n").unwrap();
        assert_eq!(block.start_line(), 0);
        assert_eq!(block.text_field("title").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let lines = split_lines("---\ntitle: [unclosed\n---\n");
        let err = locate(Path::new("bad.md"), &lines).unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse { ref path, .. } if path == Path::new("bad.md")));
    }

    #[test]
    fn test_text_field_values() {
        let block = block(
            "---\ntitle: Hello\nyear: 2024\ndraft: false\npublished: true\nempty: ''\ntags:\n  - a\nnothing:\n---\n",
        )
        .unwrap();

        assert_eq!(block.text_field("title").as_deref(), Some("Hello"));
        assert_eq!(block.text_field("year").as_deref(), Some("2024"));
        assert_eq!(block.text_field("published").as_deref(), Some("true"));
        assert_eq!(block.text_field("draft"), None);
        assert_eq!(block.text_field("empty"), None);
        assert_eq!(block.text_field("tags"), None);
        assert_eq!(block.text_field("nothing"), None);
        assert_eq!(block.text_field("missing"), None);
    }

    #[rstest]
    #[case::zero("0", None)]
    #[case::negative_zero("-0.0", None)]
    #[case::nan(".nan", None)]
    #[case::integer("7", Some("7"))]
    #[case::float("1.5", Some("1.5"))]
    fn test_numeric_text(#[case] value: &str, #[case] expected: Option<&str>) {
        let block = block(&format!("---\ntitle: {value}\nlayout: post\n---\n")).unwrap();
        assert_eq!(block.text_field("title").as_deref(), expected);
    }

    #[test]
    fn test_folded_scalar_drops_trailing_newline() {
        let block = block("---\ndescription: >\n  One line\n---\n").unwrap();
        assert_eq!(block.text_field("description").as_deref(), Some("One line"));
    }
}
