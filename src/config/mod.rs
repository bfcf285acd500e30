pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::tag::TagMatching;
use crate::walk::Language;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub lang: Language,
    pub format: String,
    pub recursive: bool,
    pub quiet: bool,
    pub output: PathBuf,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Tag parsing and aggregation
    pub parser: ResolvedParserConfig,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedParserConfig {
    /// Fail the scan on any malformed annotation
    pub strict: bool,
    pub tag_matching: TagMatching,
    /// Owner for implicit relationships
    pub default_service: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            lang: Language::Go,
            format: "yaml".to_string(),
            recursive: false,
            quiet: false,
            output: PathBuf::from("."),
            include: Vec::new(),
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            parser: ResolvedParserConfig::default(),
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exclude patterns from config and the ignore file combined.
    pub fn effective_excludes(&self) -> Vec<String> {
        self.exclude
            .iter()
            .chain(self.ignore_patterns.iter())
            .cloned()
            .collect()
    }
}
