use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{Result, ServicefileError};
use crate::output::OutputFormat;
use crate::tag::TagMatching;
use crate::walk::Language;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_NAME: &str = ".servicefile.toml";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub lang: Option<Language>,
    pub format: Option<OutputFormat>,
    pub recursive: bool,
    pub quiet: bool,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub tag_matching: Option<TagMatching>,
    pub default_service: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Every key `config show` reports.
const KEYS: [&str; 10] = [
    "defaults.lang",
    "defaults.format",
    "defaults.recursive",
    "defaults.quiet",
    "defaults.output",
    "targeting.include",
    "targeting.exclude",
    "parser.strict",
    "parser.tag_matching",
    "parser.default_service",
];

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/servicefile/config.toml)
/// 3. Project config (nearest .servicefile.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    for key in KEYS {
        prov.record(key, Source::Default);
    }

    if let Some(path) = find_user_config().filter(|p| p.is_file()) {
        let file_config = load_file_config(&path, "user")?;
        apply_file_config(&mut config, &file_config, Source::UserConfig(path.clone()), &mut prov)?;
        config.loaded_files.push(path);
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file_config(&path, "project")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        )?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov, |name| std::env::var(name).ok())?;
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = crate::config::ignore::load_ignore_patterns(working_dir);
    config.provenance = prov;

    tracing::debug!(
        "Resolved config from {} file(s): lang={} format={} recursive={}",
        config.loaded_files.len(),
        config.lang,
        config.format,
        config.recursive
    );

    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("servicefile").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_NAME))
        .find(|path| path.is_file())
}

fn load_file_config(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        ServicefileError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content).map_err(|e| {
        ServicefileError::Config(format!("Invalid {layer} config {}: {e}", path.display()))
    })
}

fn parse_lang(value: &str) -> Result<Language> {
    value.parse().map_err(ServicefileError::Config)
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref lang) = file.defaults.lang {
        config.lang = parse_lang(lang)?;
        prov.record("defaults.lang", source.clone());
    }
    if let Some(ref format) = file.defaults.format {
        config.format = format.clone();
        prov.record("defaults.format", source.clone());
    }
    if let Some(recursive) = file.defaults.recursive {
        config.recursive = recursive;
        prov.record("defaults.recursive", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.record("defaults.quiet", source.clone());
    }
    if let Some(ref output) = file.defaults.output {
        config.output = PathBuf::from(output);
        prov.record("defaults.output", source.clone());
    }

    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.record("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.record("targeting.exclude", source.clone());
    }

    if let Some(strict) = file.parser.strict {
        config.parser.strict = strict;
        prov.record("parser.strict", source.clone());
    }
    if let Some(tag_matching) = file.parser.tag_matching {
        config.parser.tag_matching = tag_matching;
        prov.record("parser.tag_matching", source.clone());
    }
    if let Some(ref default_service) = file.parser.default_service {
        config.parser.default_service = Some(default_service.clone());
        prov.record("parser.default_service", source);
    }

    Ok(())
}

fn env_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    prov: &mut ProvenanceMap,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = lookup("SERVICEFILE_LANG") {
        config.lang = parse_lang(&val)?;
        prov.record("defaults.lang", Source::EnvVar("SERVICEFILE_LANG"));
    }
    if let Some(val) = lookup("SERVICEFILE_FORMAT") {
        config.format = val;
        prov.record("defaults.format", Source::EnvVar("SERVICEFILE_FORMAT"));
    }
    if let Some(val) = lookup("SERVICEFILE_RECURSIVE") {
        config.recursive = env_flag(&val);
        prov.record("defaults.recursive", Source::EnvVar("SERVICEFILE_RECURSIVE"));
    }
    if let Some(val) = lookup("SERVICEFILE_QUIET") {
        config.quiet = env_flag(&val);
        prov.record("defaults.quiet", Source::EnvVar("SERVICEFILE_QUIET"));
    }
    if let Some(val) = lookup("SERVICEFILE_OUTPUT") {
        config.output = PathBuf::from(val);
        prov.record("defaults.output", Source::EnvVar("SERVICEFILE_OUTPUT"));
    }
    if let Some(val) = lookup("SERVICEFILE_INCLUDE") {
        config.include = env_list(&val);
        prov.record("targeting.include", Source::EnvVar("SERVICEFILE_INCLUDE"));
    }
    if let Some(val) = lookup("SERVICEFILE_EXCLUDE") {
        config.exclude = env_list(&val);
        prov.record("targeting.exclude", Source::EnvVar("SERVICEFILE_EXCLUDE"));
    }
    if let Some(val) = lookup("SERVICEFILE_STRICT") {
        config.parser.strict = env_flag(&val);
        prov.record("parser.strict", Source::EnvVar("SERVICEFILE_STRICT"));
    }
    if let Some(val) = lookup("SERVICEFILE_TAG_MATCHING") {
        config.parser.tag_matching = val.parse().map_err(ServicefileError::Config)?;
        prov.record(
            "parser.tag_matching",
            Source::EnvVar("SERVICEFILE_TAG_MATCHING"),
        );
    }
    if let Some(val) = lookup("SERVICEFILE_DEFAULT_SERVICE") {
        config.parser.default_service = Some(val);
        prov.record(
            "parser.default_service",
            Source::EnvVar("SERVICEFILE_DEFAULT_SERVICE"),
        );
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(lang) = cli.lang {
        config.lang = lang;
        prov.record("defaults.lang", Source::CliFlag("--lang"));
    }
    if let Some(format) = cli.format {
        config.format = format.to_string();
        prov.record("defaults.format", Source::CliFlag("--format"));
    }
    if cli.recursive {
        config.recursive = true;
        prov.record("defaults.recursive", Source::CliFlag("--recursive"));
    }
    if cli.quiet {
        config.quiet = true;
        prov.record("defaults.quiet", Source::CliFlag("--quiet"));
    }
    if let Some(ref output) = cli.output {
        config.output = output.clone();
        prov.record("defaults.output", Source::CliFlag("--output"));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.record("targeting.include", Source::CliFlag("--include"));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.record("targeting.exclude", Source::CliFlag("--exclude"));
    }
    if cli.strict {
        config.parser.strict = true;
        prov.record("parser.strict", Source::CliFlag("--strict"));
    }
    if let Some(tag_matching) = cli.tag_matching {
        config.parser.tag_matching = tag_matching;
        prov.record("parser.tag_matching", Source::CliFlag("--tag-matching"));
    }
    if let Some(ref default_service) = cli.default_service {
        config.parser.default_service = Some(default_service.clone());
        prov.record("parser.default_service", Source::CliFlag("--default-service"));
    }
}
