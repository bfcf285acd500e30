use crate::cli::ScanArgs;
use crate::config::resolve::resolve_config;
use crate::errors::{Result, ServicefileError};
use crate::output::document;
use crate::output::OutputFormat;
use crate::scan::{self, ScanOptions};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Document format (yaml or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Directory the service files are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let root = args.scan.root()?;

    let mut overrides = args.scan.to_cli_overrides();
    overrides.format = args.format;
    overrides.output = args.output.clone();
    let config = resolve_config(&root, &overrides)?;

    let format: OutputFormat = config.format.parse().map_err(ServicefileError::Config)?;
    if !format.is_document() {
        return Err(ServicefileError::Config(format!(
            "generate writes yaml or json, not {format}; use `servicefile graph --format {format}`"
        )));
    }

    let report = scan::run_scan(&root, &ScanOptions::from(&config))?;
    let written = document::write_documents(&report.service_files, &config.output, format)?;

    super::report_summary(&report, config.quiet);
    if !config.quiet {
        for path in &written {
            eprintln!("  wrote {}", path.display());
        }
    }
    Ok(())
}
