use crate::errors::{Result, ServicefileError};
use crate::graph::ServiceFile;
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

/// Serialize one service file.
pub fn render_document(service_file: &ServiceFile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(service_file)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(service_file)?;
            out.push('\n');
            Ok(out)
        }
        other => Err(unsupported(other)),
    }
}

/// Serialize all service files as a single YAML sequence or JSON array.
pub fn render_all(service_files: &[ServiceFile], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(service_files)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(service_files)?;
            out.push('\n');
            Ok(out)
        }
        other => Err(unsupported(other)),
    }
}

fn unsupported(format: OutputFormat) -> ServicefileError {
    ServicefileError::Config(format!(
        "{format} format cannot be written as a service file; use yaml or json"
    ))
}

/// Lower-case `name`, replacing every run of non-alphanumerics with `-`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "service".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name for one document: `servicefile.<ext>` when it is the only one,
/// `<slug>.servicefile.<ext>` otherwise.
pub fn document_file_name(
    service_file: &ServiceFile,
    total: usize,
    format: OutputFormat,
) -> String {
    if total == 1 {
        format!("servicefile.{}", format.extension())
    } else {
        format!(
            "{}.servicefile.{}",
            slug(&service_file.info.name),
            format.extension()
        )
    }
}

/// Write every service file into `dir` (created if missing). Returns the
/// written paths in input order.
pub fn write_documents(
    service_files: &[ServiceFile],
    dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    if !format.is_document() {
        return Err(unsupported(format));
    }

    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(service_files.len());
    for service_file in service_files {
        let path = dir.join(document_file_name(service_file, service_files.len(), format));
        if written.contains(&path) {
            return Err(ServicefileError::Config(format!(
                "Services map to the same output file {}; rename one of them",
                path.display()
            )));
        }
        std::fs::write(&path, render_document(service_file, format)?)?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
