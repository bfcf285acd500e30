use serde::{Deserialize, Serialize};

/// Version stamped into every emitted document.
pub const SPEC_VERSION: &str = "1.0";

/// One output document per distinct service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFile {
    pub spec_version: String,
    pub info: Info,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub technology: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub proto: String,
}

impl ServiceFile {
    /// Create an empty document for `info`.
    pub fn new(info: Info) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            info,
            relationships: Vec::new(),
        }
    }

    /// Put relationships in canonical order: action, target name, technology,
    /// proto, then description. The sort is stable so duplicates keep their
    /// relative order.
    pub fn sort(&mut self) {
        self.relationships.sort_by(|a, b| {
            a.action
                .cmp(&b.action)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.technology.cmp(&b.technology))
                .then_with(|| a.proto.cmp(&b.proto))
                .then_with(|| a.description.cmp(&b.description))
        });
    }
}
