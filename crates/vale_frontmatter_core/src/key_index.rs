//! Maps front matter keys to the document lines that declare them.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::DelimiterSpan;

/// A line-anchored `key:` token. ASCII word characters only.
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+):").expect("valid key pattern"));

/// Zero-based document line of each top-level key declared inside a front
/// matter block.
///
/// The index only recognises a `key:` prefix in the first column of a line.
/// It does not parse YAML structure: indented lines (nested mappings,
/// continuation lines of multi-line values, list items) are never indexed.
/// If a key is declared twice at the top level, the first declaration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyLineIndex {
    lines: HashMap<String, usize>,
}

impl KeyLineIndex {
    /// Builds the index for the interior of `span`.
    pub fn build(lines: &[&str], span: DelimiterSpan) -> Self {
        let mut index = HashMap::new();

        for line_index in span.interior() {
            let Some(line) = lines.get(line_index) else {
                break;
            };
            if let Some(captures) = KEY_PATTERN.captures(line.trim_end()) {
                index
                    .entry(captures[1].to_string())
                    .or_insert(line_index);
            }
        }

        Self { lines: index }
    }

    /// Returns the line on which `key` is declared.
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.lines.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{locate_delimiters, split_lines};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn index(text: &str) -> KeyLineIndex {
        let lines = split_lines(text);
        let span = locate_delimiters(&lines).unwrap();
        KeyLineIndex::build(&lines, span)
    }

    #[test]
    fn test_indexes_top_level_keys() {
        let index = index("---\ntitle: Hello\ndate: 2024-01-01\ndescription: Text\n---\nBody");
        assert_eq!(index.len(), 3);
        assert_eq!(index.line_of("title"), Some(1));
        assert_eq!(index.line_of("date"), Some(2));
        assert_eq!(index.line_of("description"), Some(3));
        assert_eq!(index.line_of("summary"), None);
    }

    #[test]
    fn test_ignores_lines_outside_block() {
        let index = index("---\nauthor: me\n---\ntitle: not front matter\n");
        assert_eq!(index.line_of("author"), Some(1));
        assert_eq!(index.line_of("title"), None);
    }

    #[rstest]
    #[case::list_item("---\ntags:\n  - title: x\n---\n", "title")]
    #[case::continuation("---\ndescription: >\n  summary of things\n---\n", "summary")]
    #[case::quoted_key("---\n\"title\": Quoted\n---\n", "title")]
    #[case::hyphenated_key("---\nmy-title: x\n---\n", "my-title")]
    #[case::space_before_colon("---\ntitle : x\n---\n", "title")]
    fn test_unrecognised_keys(#[case] text: &str, #[case] key: &str) {
        assert_eq!(index(text).line_of(key), None);
    }

    #[test]
    fn test_indented_keys_are_not_indexed() {
        let index = index("---\nmeta:\n  author: me\n---\n");
        assert_eq!(index.line_of("meta"), Some(1));
        assert_eq!(index.line_of("author"), None);
    }

    #[rstest]
    #[case::nested_after("---\ntitle: Top\nseo:\n  title: Nested\n---\n", 1)]
    #[case::nested_before("---\nseo:\n  title: SEO title\ntitle: Real title\n---\n", 3)]
    #[case::tab_indented("---\nseo:\n\ttitle: Nested\ntitle: Top\n---\n", 3)]
    fn test_nested_keys_never_claim_top_level_line(#[case] text: &str, #[case] line: usize) {
        assert_eq!(index(text).line_of("title"), Some(line));
    }

    #[test]
    fn test_crlf_lines() {
        let index = index("---\r\ntitle: Hello\r\n---\r\n");
        assert_eq!(index.line_of("title"), Some(1));
    }

    #[test]
    fn test_value_containing_colon() {
        let index = index("---\ntitle: Rust: a primer\n---\n");
        assert_eq!(index.line_of("title"), Some(1));
        assert_eq!(index.line_of("Rust"), None);
    }
}
