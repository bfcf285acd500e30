use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.iter() {
        writeln!(w, "  {}: {} <- {}", key, value_for_key(config, key), source)?;
    }

    if !config.ignore_patterns.is_empty() {
        writeln!(w)?;
        writeln!(w, "Ignore patterns: {:?}", config.ignore_patterns)?;
    }

    Ok(())
}

fn value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.lang" => config.lang.to_string(),
        "defaults.format" => config.format.clone(),
        "defaults.recursive" => config.recursive.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "defaults.output" => config.output.display().to_string(),
        "targeting.include" => format!("{:?}", config.include),
        "targeting.exclude" => format!("{:?}", config.exclude),
        "parser.strict" => config.parser.strict.to_string(),
        "parser.tag_matching" => config.parser.tag_matching.to_string(),
        "parser.default_service" => config
            .parser
            .default_service
            .clone()
            .unwrap_or_else(|| "(infer)".to_string()),
        _ => "(unknown)".to_string(),
    }
}
