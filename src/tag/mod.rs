//! Annotation tags embedded in comment groups.
//!
//! A comment group is *tagged* when it carries the `service:` marker. Tagged
//! groups either declare a service (`service:name <Name>`) or declare one
//! relationship of a service (`service:<action> <target>` or
//! `service:<Owner>:<action> <target>`).

pub mod relationship;
pub mod service;

use crate::graph::ir::{RelationshipDecl, ServiceDecl};
use crate::parse::common::{CommentGroup, SourceLocation};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

pub const SERVICE_MARKER: &str = "service:";
pub const SERVICE_NAME_MARKER: &str = "service:name";

/// Comment markers of one source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Checked in order; the first match is stripped.
    pub line_prefixes: &'static [&'static str],
    pub block_end: &'static str,
}

impl CommentSyntax {
    pub const GO: CommentSyntax = CommentSyntax {
        line_prefixes: &["//", "/*"],
        block_end: "*/",
    };

    pub const RUST: CommentSyntax = CommentSyntax {
        line_prefixes: &["///", "//!", "//", "/**", "/*!", "/*", "*"],
        block_end: "*/",
    };

    /// Strip comment markers and surrounding whitespace from one raw line.
    pub fn strip<'a>(&self, line: &'a str) -> &'a str {
        let mut comment = line.trim();
        comment = comment.strip_suffix(self.block_end).unwrap_or(comment).trim_end();
        for prefix in self.line_prefixes {
            if let Some(rest) = comment.strip_prefix(prefix) {
                comment = rest;
                break;
            }
        }
        comment.trim()
    }
}

/// How the `service:` marker is located inside a comment group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagMatching {
    /// Marker may appear anywhere in the group text.
    #[default]
    Substring,
    /// Marker must begin a stripped comment line.
    LineStart,
}

impl std::str::FromStr for TagMatching {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(TagMatching::Substring),
            "line-start" | "line_start" => Ok(TagMatching::LineStart),
            _ => Err(format!("unsupported tag matching mode: {s}")),
        }
    }
}

impl fmt::Display for TagMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMatching::Substring => write!(f, "substring"),
            TagMatching::LineStart => write!(f, "line-start"),
        }
    }
}

/// Result of classifying one comment group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Untagged,
    /// Normalized lines of a service declaration
    Service(Vec<String>),
    /// Normalized lines of a relationship declaration
    Relationship(Vec<String>),
}

/// Split a group into stripped, non-empty lines.
pub fn normalize_lines(text: &str, syntax: CommentSyntax) -> Vec<String> {
    text.lines()
        .map(|line| syntax.strip(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a raw comment group.
pub fn classify(text: &str, syntax: CommentSyntax, matching: TagMatching) -> Classification {
    match matching {
        TagMatching::Substring => {
            if !text.contains(SERVICE_MARKER) {
                return Classification::Untagged;
            }
            let lines = normalize_lines(text, syntax);
            if text.contains(SERVICE_NAME_MARKER) {
                Classification::Service(lines)
            } else {
                Classification::Relationship(lines)
            }
        }
        TagMatching::LineStart => {
            let lines = normalize_lines(text, syntax);
            if !lines.iter().any(|l| l.starts_with(SERVICE_MARKER)) {
                return Classification::Untagged;
            }
            if lines.iter().any(|l| l.starts_with(SERVICE_NAME_MARKER)) {
                Classification::Service(lines)
            } else {
                Classification::Relationship(lines)
            }
        }
    }
}

/// A record produced by one tagged comment group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Service(ServiceDecl),
    Relationship(RelationshipDecl),
}

/// Why a tagged group was dropped or trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `service:name` block without a name
    MissingServiceName,
    /// relationship block whose `service:` line yields no action
    MissingAction,
    /// explicit addressing token with parts beyond `service:<Owner>:<action>`
    ExtraAddressingParts { dropped: Vec<String> },
}

/// A non-fatal problem found while reading tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDiagnostic {
    pub kind: DiagnosticKind,
    pub location: SourceLocation,
}

impl fmt::Display for TagDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.location.file.display(), self.location.line)?;
        match &self.kind {
            DiagnosticKind::MissingServiceName => {
                write!(f, "service declaration without a name, block ignored")
            }
            DiagnosticKind::MissingAction => {
                write!(f, "relationship without an action, block ignored")
            }
            DiagnosticKind::ExtraAddressingParts { dropped } => {
                write!(f, "extra addressing parts dropped: {}", dropped.join(":"))
            }
        }
    }
}

/// Everything one comment group contributed.
#[derive(Debug, Default)]
pub struct TagOutcome {
    pub declaration: Option<Declaration>,
    pub diagnostics: Vec<TagDiagnostic>,
}

/// Classify a comment group and build the record it declares, if any.
pub fn parse_group(group: &CommentGroup, matching: TagMatching) -> TagOutcome {
    let mut outcome = TagOutcome::default();
    let diagnostic = |kind| TagDiagnostic {
        kind,
        location: group.location.clone(),
    };

    match classify(&group.text, group.syntax, matching) {
        Classification::Untagged => {}
        Classification::Service(lines) => match service::build_service(&lines) {
            Some(s) => outcome.declaration = Some(Declaration::Service(s)),
            None => outcome
                .diagnostics
                .push(diagnostic(DiagnosticKind::MissingServiceName)),
        },
        Classification::Relationship(lines) => {
            let built = relationship::build_relationship(&lines, Some(group.location.clone()));
            if !built.dropped_parts.is_empty() {
                outcome
                    .diagnostics
                    .push(diagnostic(DiagnosticKind::ExtraAddressingParts {
                        dropped: built.dropped_parts,
                    }));
            }
            match built.relationship {
                Some(r) => outcome.declaration = Some(Declaration::Relationship(r)),
                None => outcome
                    .diagnostics
                    .push(diagnostic(DiagnosticKind::MissingAction)),
            }
        }
    }

    outcome
}
