pub mod config;
pub mod generate;
pub mod graph;

use crate::config::resolve::CliOverrides;
use crate::errors::{Result, ServicefileError};
use crate::tag::TagMatching;
use crate::walk::Language;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "servicefile",
    version,
    about = "Generate service topology documents from source code annotations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write one service file per annotated service
    Generate(generate::GenerateArgs),
    /// Print the annotated service topology
    Graph(graph::GraphArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Graph(args) => graph::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

/// Flags shared by every command that scans sources.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan
    pub path: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Source language
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Fail on malformed annotations instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Where the `service:` marker may appear in a comment
    #[arg(long, value_enum)]
    pub tag_matching: Option<TagMatching>,

    /// Owner for relationships that do not name one
    #[arg(long)]
    pub default_service: Option<String>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl ScanArgs {
    pub fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            lang: self.lang,
            recursive: self.recursive,
            quiet: self.quiet,
            strict: self.strict,
            tag_matching: self.tag_matching,
            default_service: self.default_service.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            ..Default::default()
        }
    }

    /// Canonical form of the scanned directory or file.
    pub fn root(&self) -> Result<PathBuf> {
        self.path
            .canonicalize()
            .map_err(|_| ServicefileError::InvalidPath {
                path: self.path.clone(),
            })
    }
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    s.parse()
}

pub(crate) fn canonical_dir(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| ServicefileError::InvalidPath {
            path: path.to_path_buf(),
        })
}

/// Print diagnostics and the one-line summary to stderr.
pub(crate) fn report_summary(report: &crate::scan::ScanReport, quiet: bool) {
    if quiet {
        return;
    }
    for diagnostic in &report.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    eprintln!(
        "Found {} services ({} relationships) in {} files",
        report.service_files.len(),
        report.relationship_count(),
        report.files_parsed
    );
}
