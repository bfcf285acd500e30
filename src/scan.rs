use crate::config::ResolvedConfig;
use crate::errors::{Result, ServicefileError};
use crate::graph::{ServiceFile, ServiceGraphBuilder};
use crate::parse::{factory, CommentGroup};
use crate::tag::{self, TagDiagnostic, TagMatching};
use crate::walk::{self, Language};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings for one scan, taken from the resolved config.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub lang: Language,
    pub recursive: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub strict: bool,
    pub tag_matching: TagMatching,
    pub default_service: Option<String>,
    pub quiet: bool,
}

impl From<&ResolvedConfig> for ScanOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            lang: config.lang,
            recursive: config.recursive,
            include: config.include.clone(),
            exclude: config.effective_excludes(),
            strict: config.parser.strict,
            tag_matching: config.parser.tag_matching,
            default_service: config.parser.default_service.clone(),
            quiet: config.quiet,
        }
    }
}

/// Result of a successful scan.
#[derive(Debug)]
pub struct ScanReport {
    pub service_files: Vec<ServiceFile>,
    pub files_parsed: usize,
    pub groups_seen: usize,
    pub tagged_groups: usize,
    pub diagnostics: Vec<TagDiagnostic>,
}

impl ScanReport {
    pub fn relationship_count(&self) -> usize {
        self.service_files.iter().map(|s| s.relationships.len()).sum()
    }
}

/// Parser state for a single scan. Comment groups are fed in discovery order,
/// then `finish` aggregates them. A session is not reused across scans.
pub struct Scan {
    builder: ServiceGraphBuilder,
    tag_matching: TagMatching,
    strict: bool,
    groups_seen: usize,
    tagged_groups: usize,
    diagnostics: Vec<TagDiagnostic>,
}

impl Scan {
    pub fn new(options: &ScanOptions) -> Self {
        Self {
            builder: ServiceGraphBuilder::new()
                .with_default_service(options.default_service.clone()),
            tag_matching: options.tag_matching,
            strict: options.strict,
            groups_seen: 0,
            tagged_groups: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn add_comment_group(&mut self, group: &CommentGroup) {
        self.groups_seen += 1;
        let outcome = tag::parse_group(group, self.tag_matching);

        for diagnostic in &outcome.diagnostics {
            tracing::warn!("{diagnostic}");
        }
        self.diagnostics.extend(outcome.diagnostics);

        if let Some(declaration) = outcome.declaration {
            tracing::debug!(
                "{}:{}: {:?}",
                group.location.file.display(),
                group.location.line,
                declaration
            );
            self.tagged_groups += 1;
            self.builder.add_declaration(declaration);
        }
    }

    /// Aggregate everything seen so far.
    pub fn finish(self, files_parsed: usize) -> Result<ScanReport> {
        if self.strict {
            if let Some(first) = self.diagnostics.first() {
                return Err(ServicefileError::StrictAnnotations {
                    count: self.diagnostics.len(),
                    first: first.to_string(),
                });
            }
        }

        let service_files = self.builder.build()?;

        Ok(ScanReport {
            service_files,
            files_parsed,
            groups_seen: self.groups_seen,
            tagged_groups: self.tagged_groups,
            diagnostics: self.diagnostics,
        })
    }
}

struct FileComments {
    groups: Vec<CommentGroup>,
}

fn progress_bar(len: usize) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new(len as u64);
    if let Ok(style) = indicatif::ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Read and extract comments from every file in parallel, keeping discovery
/// order in the result.
fn extract_all(
    files: &[PathBuf],
    lang: Language,
    progress: Option<&indicatif::ProgressBar>,
) -> Result<Vec<FileComments>> {
    files
        .par_iter()
        .map(|file_path| -> Result<FileComments> {
            let source = std::fs::read(file_path).map_err(|e| ServicefileError::Read {
                file: file_path.clone(),
                source: e,
            })?;

            // Each worker gets its own frontend; tree-sitter parsers are not shared
            let frontend = factory::create_frontend(lang);
            let groups = frontend.extract_comment_groups(&source, file_path)?;

            if let Some(pb) = progress {
                pb.inc(1);
            }
            Ok(FileComments { groups })
        })
        .collect()
}

/// Scan `root` and aggregate every tagged comment into service files.
pub fn run_scan(root: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let start = Instant::now();

    let files = walk::discover_files(
        root,
        options.lang,
        options.recursive,
        &options.include,
        &options.exclude,
    )?;
    tracing::debug!("Discovered {} {} file(s)", files.len(), options.lang);

    let progress = (!options.quiet).then(|| progress_bar(files.len()));
    let extracted = extract_all(&files, options.lang, progress.as_ref());
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let extracted = extracted?;

    let mut scan = Scan::new(options);
    for file in &extracted {
        for group in &file.groups {
            scan.add_comment_group(group);
        }
    }

    let report = scan.finish(files.len())?;
    tracing::info!(
        "Scanned {} file(s), {} tagged of {} comment group(s), {} diagnostic(s) in {:.2?}",
        report.files_parsed,
        report.tagged_groups,
        report.groups_seen,
        report.diagnostics.len(),
        start.elapsed()
    );
    Ok(report)
}
