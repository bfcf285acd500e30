use crate::graph::ir::{Addressing, RelationshipDecl};
use crate::parse::common::SourceLocation;
use crate::tag::service::value_after_colon;
use crate::tag::SERVICE_MARKER;

/// Parsed form of a relationship's `service:` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLine {
    /// Empty for implicit addressing
    pub owner: String,
    /// Empty when the line is malformed
    pub action: String,
    pub target: String,
    /// Addressing parts after `service:<Owner>:<action>`
    pub dropped_parts: Vec<String>,
}

/// Parse `service:<action> [target]` or `service:<Owner>:<action> [target]`.
///
/// The token before the first whitespace is split on `:`; everything after it
/// is the target name.
pub fn parse_service_line(comment: &str) -> ServiceLine {
    let (token, rest) = match comment.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, Some(rest)),
        None => (comment, None),
    };

    let parts: Vec<&str> = token.split(':').collect();
    let mut line = ServiceLine::default();

    match parts.len() {
        n if n >= 3 => {
            line.owner = parts[1].to_string();
            line.action = parts[2].to_string();
            line.dropped_parts = parts[3..].iter().map(|p| p.to_string()).collect();
        }
        2 => line.action = parts[1].to_string(),
        _ => {}
    }

    if let Some(rest) = rest {
        line.target = rest.trim().to_string();
    }

    line
}

/// What one relationship block produced.
#[derive(Debug, Default)]
pub struct BuiltRelationship {
    pub relationship: Option<RelationshipDecl>,
    pub dropped_parts: Vec<String>,
}

/// Build a relationship declaration from normalized lines.
///
/// A later `service:` line replaces an earlier one. Returns no relationship
/// when the action is empty.
pub fn build_relationship(lines: &[String], location: Option<SourceLocation>) -> BuiltRelationship {
    let mut service_line = ServiceLine::default();
    let mut technology = String::new();
    let mut description = String::new();
    let mut proto = String::new();

    for line in lines {
        if line.starts_with(SERVICE_MARKER) {
            service_line = parse_service_line(line);
        } else if line.starts_with("technology:") {
            technology = value_after_colon(line);
        } else if line.starts_with("description:") {
            description = value_after_colon(line);
        } else if line.starts_with("proto:") {
            proto = value_after_colon(line);
        }
    }

    let ServiceLine {
        owner,
        action,
        target,
        dropped_parts,
    } = service_line;

    if action.is_empty() {
        return BuiltRelationship {
            relationship: None,
            dropped_parts,
        };
    }

    let addressing = if owner.is_empty() {
        Addressing::Implicit
    } else {
        Addressing::Explicit { owner }
    };

    BuiltRelationship {
        relationship: Some(RelationshipDecl {
            addressing,
            action,
            target,
            technology,
            description,
            proto,
            location,
        }),
        dropped_parts,
    }
}
