use crate::errors::Result;
use crate::graph::ServiceFile;
use std::collections::BTreeSet;
use std::io::Write;

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write the service topology in Graphviz DOT format.
///
/// Declared services are boxes; relationship targets that are not services
/// themselves are ellipses.
pub fn write_dot<W: Write>(writer: &mut W, service_files: &[ServiceFile]) -> Result<()> {
    writeln!(writer, "digraph services {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(writer)?;

    let services: BTreeSet<&str> = service_files.iter().map(|s| s.info.name.as_str()).collect();

    for sf in service_files {
        writeln!(
            writer,
            "    \"{}\" [shape=box, style=filled, fillcolor=lightblue];",
            escape(&sf.info.name)
        )?;
    }

    let externals: BTreeSet<&str> = service_files
        .iter()
        .flat_map(|s| s.relationships.iter())
        .map(|r| r.name.as_str())
        .filter(|name| !name.is_empty() && !services.contains(name))
        .collect();
    for name in &externals {
        writeln!(writer, "    \"{}\" [shape=ellipse];", escape(name))?;
    }
    writeln!(writer)?;

    for sf in service_files {
        for r in sf.relationships.iter().filter(|r| !r.name.is_empty()) {
            let label = if r.proto.is_empty() {
                r.action.clone()
            } else {
                format!("{} ({})", r.action, r.proto)
            };
            writeln!(
                writer,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                escape(&sf.info.name),
                escape(&r.name),
                escape(&label)
            )?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}
