use crate::errors::Result;
use crate::graph::ServiceFile;
use std::io::Write;

/// Write the service topology as human-readable text.
pub fn write_text<W: Write>(writer: &mut W, service_files: &[ServiceFile]) -> Result<()> {
    let relationship_count: usize = service_files.iter().map(|s| s.relationships.len()).sum();

    writeln!(writer, "Service Topology")?;
    writeln!(writer, "================")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Services: {}  Relationships: {}",
        service_files.len(),
        relationship_count
    )?;

    for sf in service_files {
        writeln!(writer)?;
        match sf.info.system.as_str() {
            "" => writeln!(writer, "{}", sf.info.name)?,
            system => writeln!(writer, "{} [{}]", sf.info.name, system)?,
        }
        if !sf.info.description.is_empty() {
            writeln!(writer, "  {}", sf.info.description)?;
        }

        if sf.relationships.is_empty() {
            writeln!(writer, "  (no relationships)")?;
            continue;
        }

        for r in &sf.relationships {
            let target = if r.name.is_empty() { "-" } else { r.name.as_str() };
            write!(writer, "  {} {}", r.action, target)?;
            let details: Vec<&str> = [r.technology.as_str(), r.proto.as_str()]
                .into_iter()
                .filter(|d| !d.is_empty())
                .collect();
            if !details.is_empty() {
                write!(writer, " ({})", details.join(", "))?;
            }
            writeln!(writer)?;
            if !r.description.is_empty() {
                writeln!(writer, "      {}", r.description)?;
            }
        }
    }

    Ok(())
}
