use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ServicefileError {
    #[error("Path does not exist or is not accessible: {path}")]
    #[diagnostic(code(servicefile::invalid_path))]
    InvalidPath { path: PathBuf },

    #[error("Failed to walk the source tree: {0}")]
    #[diagnostic(code(servicefile::walk))]
    Walk(#[from] ignore::Error),

    #[error("Failed to read {file}: {source}")]
    #[diagnostic(code(servicefile::read))]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {file}: {message}")]
    #[diagnostic(code(servicefile::parse_error))]
    ParseError { file: PathBuf, message: String },

    #[error(
        "Mixed relationship definition patterns detected: some relationships use explicit \
         patterns (service:name:action) while others use implicit patterns (service:action)"
    )]
    #[diagnostic(
        code(servicefile::mixed_addressing),
        help("Use either `service:<Owner>:<action>` everywhere or `service:<action>` everywhere")
    )]
    MixedAddressingMode,

    #[error("No service name found for relationship: {relationship}")]
    #[diagnostic(
        code(servicefile::no_service),
        help("Declare a service with `service:name <Name>` or set parser.default_service")
    )]
    NoServiceFound { relationship: String },

    #[error(
        "Cannot infer the owning service for relationship: {relationship} \
         (declared services: {candidates})"
    )]
    #[diagnostic(
        code(servicefile::ambiguous_owner),
        help("Use `service:<Owner>:<action>` or set parser.default_service")
    )]
    AmbiguousImplicitOwner {
        relationship: String,
        candidates: String,
    },

    #[error("No services found")]
    #[diagnostic(code(servicefile::no_services))]
    NoServicesFound,

    #[error("{count} malformed annotation(s) in strict mode; first: {first}")]
    #[diagnostic(code(servicefile::strict))]
    StrictAnnotations { count: usize, first: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(servicefile::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(servicefile::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(servicefile::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(servicefile::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    #[diagnostic(code(servicefile::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, ServicefileError>;
