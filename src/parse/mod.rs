pub mod common;
pub mod factory;
pub mod go;
pub mod rust;

pub use common::CommentGroup;

use crate::errors::{Result, ServicefileError};
use crate::tag::CommentSyntax;
use common::RawComment;
use std::path::Path;
use streaming_iterator::StreamingIterator;

/// Implemented once per language.
pub trait CommentFrontend {
    /// Return the tree-sitter Language for this frontend.
    fn language(&self) -> tree_sitter::Language;

    /// Tree-sitter query capturing every comment node.
    fn comment_query(&self) -> &'static str;

    /// Comment markers understood by the tag extractor.
    fn comment_syntax(&self) -> CommentSyntax;

    /// Extract all comment groups from a single file's source.
    ///
    /// A file with a syntax error is rejected as a whole.
    fn extract_comment_groups(&self, source: &[u8], file_path: &Path) -> Result<Vec<CommentGroup>> {
        let parse_error = |message: String| ServicefileError::ParseError {
            file: file_path.to_path_buf(),
            message,
        };

        let text = std::str::from_utf8(source)
            .map_err(|e| parse_error(format!("invalid UTF-8: {e}")))?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language())
            .map_err(|e| parse_error(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| parse_error("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(parse_error(format!("syntax error near line {line}")));
        }

        let query = tree_sitter::Query::new(&self.language(), self.comment_query())
            .map_err(|e| parse_error(e.to_string()))?;
        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source);

        let mut comments = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let Some(comment_text) = text.get(node.byte_range()) else {
                    continue;
                };
                comments.push(RawComment {
                    text: comment_text,
                    start_byte: node.start_byte(),
                    end_byte: node.end_byte(),
                    start_row: node.start_position().row,
                });
            }
        }
        comments.sort_by_key(|c| c.start_byte);
        comments.dedup_by_key(|c| c.start_byte);

        let groups = common::group_comments(&comments, text, self.comment_syntax(), file_path);
        tracing::debug!(
            "{}: {} comments in {} groups",
            file_path.display(),
            comments.len(),
            groups.len()
        );
        Ok(groups)
    }
}

fn first_error_line(node: tree_sitter::Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(child) {
                return Some(line);
            }
        }
    }
    None
}
