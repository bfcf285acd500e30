use crate::graph::ir::ServiceDecl;
use crate::tag::SERVICE_NAME_MARKER;

/// Build a service declaration from normalized lines.
///
/// Lines are read independently; unknown lines are ignored. Returns `None`
/// when no non-empty name was found.
pub fn build_service(lines: &[String]) -> Option<ServiceDecl> {
    let mut name = String::new();
    let mut description = String::new();
    let mut system = String::new();

    for line in lines {
        if line.starts_with(SERVICE_NAME_MARKER) {
            if let Some((_, value)) = line.split_once(' ') {
                name = value.trim().to_string();
            }
            continue;
        }

        if line.starts_with("description:") {
            description = value_after_colon(line);
            continue;
        }

        if line.starts_with("system:") {
            system = value_after_colon(line);
        }
    }

    if name.is_empty() {
        return None;
    }

    Some(ServiceDecl {
        name,
        description,
        system,
    })
}

/// Trimmed text after the first `:` of a line.
pub(crate) fn value_after_colon(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}
