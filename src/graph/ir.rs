use crate::parse::common::SourceLocation;
use std::fmt;

/// A service declared by a `service:name` comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDecl {
    /// Never empty.
    pub name: String,
    pub description: String,
    pub system: String,
}

/// How a relationship names the service that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// `service:<Owner>:<action>`
    Explicit { owner: String },
    /// `service:<action>`, owner inferred at aggregation time
    Implicit,
}

impl Addressing {
    pub fn owner(&self) -> Option<&str> {
        match self {
            Addressing::Explicit { owner } => Some(owner),
            Addressing::Implicit => None,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Addressing::Explicit { .. })
    }
}

/// A relationship declared by a non-`service:name` tagged comment block.
///
/// Relationships have no identity: identical records are kept side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDecl {
    pub addressing: Addressing,
    /// Never empty.
    pub action: String,
    pub target: String,
    pub technology: String,
    pub description: String,
    pub proto: String,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for RelationshipDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service_name: {}, action: {}, target_name: {}, technology: {}, proto: {}, description: {}",
            self.addressing.owner().unwrap_or(""),
            self.action,
            self.target,
            self.technology,
            self.proto,
            self.description,
        )?;
        if let Some(ref loc) = self.location {
            write!(f, " (at {}:{})", loc.file.display(), loc.line)?;
        }
        Ok(())
    }
}
