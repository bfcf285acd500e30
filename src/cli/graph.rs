use crate::cli::ScanArgs;
use crate::config::resolve::resolve_config;
use crate::errors::{Result, ServicefileError};
use crate::output::OutputFormat;
use crate::output::{document, dot, text};
use crate::scan::{self, ScanOptions};
use clap::Args;
use std::io::Write;

#[derive(Debug, Args)]
pub struct GraphArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format (text, dot, json or yaml)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: &GraphArgs) -> Result<()> {
    let root = args.scan.root()?;

    let mut overrides = args.scan.to_cli_overrides();
    overrides.format = args.format;
    let config = resolve_config(&root, &overrides)?;
    let format: OutputFormat = config.format.parse().map_err(ServicefileError::Config)?;

    let report = scan::run_scan(&root, &ScanOptions::from(&config))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => text::write_text(&mut out, &report.service_files)?,
        OutputFormat::Dot => dot::write_dot(&mut out, &report.service_files)?,
        OutputFormat::Json | OutputFormat::Yaml => {
            out.write_all(document::render_all(&report.service_files, format)?.as_bytes())?
        }
    }
    out.flush()?;

    super::report_summary(&report, config.quiet);
    Ok(())
}
