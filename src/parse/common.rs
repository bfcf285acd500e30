use crate::tag::CommentSyntax;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Source location for diagnostics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
}

/// One contiguous block of comment text, markers still attached.
#[derive(Debug, Clone)]
pub struct CommentGroup {
    /// Newline-joined raw text of the group's comments
    pub text: String,
    pub syntax: CommentSyntax,
    pub location: SourceLocation,
}

/// A single comment token as seen by a frontend.
#[derive(Debug, Clone, Copy)]
pub struct RawComment<'a> {
    pub text: &'a str,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 0-indexed row of the first character
    pub start_row: usize,
}

/// Fold comments (in document order) into groups.
///
/// Two comments belong to the same group when nothing but whitespace separates
/// them and that whitespace contains at most one line break. A line comment
/// that swallowed its own trailing newline counts that newline as separation.
/// A group that starts after code on the same line ends with that line.
pub fn group_comments(
    comments: &[RawComment<'_>],
    source: &str,
    syntax: CommentSyntax,
    file_path: &Path,
) -> Vec<CommentGroup> {
    let mut groups = Vec::new();
    // (group, last comment, group started after code)
    let mut current: Option<(CommentGroup, RawComment<'_>, bool)> = None;

    for comment in comments {
        let joins = match current {
            Some((_, prev, after_code)) => {
                let gap = source.get(prev.end_byte..comment.start_byte).unwrap_or("x");
                let breaks = gap.matches('\n').count() + usize::from(prev.text.ends_with('\n'));
                let limit = if after_code { 0 } else { 1 };
                gap.chars().all(char::is_whitespace) && breaks <= limit
            }
            None => false,
        };

        let text = comment.text.trim_end_matches(['\n', '\r']);

        if joins {
            if let Some((ref mut group, ref mut prev, _)) = current {
                group.text.push_str(text);
                group.text.push('\n');
                *prev = *comment;
            }
            continue;
        }

        if let Some((group, _, _)) = current.take() {
            groups.push(group);
        }
        let mut group_text = String::with_capacity(text.len() + 1);
        group_text.push_str(text);
        group_text.push('\n');
        current = Some((
            CommentGroup {
                text: group_text,
                syntax,
                location: SourceLocation {
                    file: file_path.to_path_buf(),
                    line: comment.start_row + 1,
                },
            },
            *comment,
            follows_code(source, comment.start_byte),
        ));
    }

    if let Some((group, _, _)) = current {
        groups.push(group);
    }

    groups
}

/// Whether anything but whitespace precedes `start_byte` on its line.
fn follows_code(source: &str, start_byte: usize) -> bool {
    let Some(before) = source.get(..start_byte) else {
        return false;
    };
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    !before[line_start..].chars().all(char::is_whitespace)
}
