use crate::parse::go::GoFrontend;
use crate::parse::rust::RustFrontend;
use crate::parse::CommentFrontend;
use crate::walk::Language;

/// Create a CommentFrontend for a given language.
pub fn create_frontend(lang: Language) -> Box<dyn CommentFrontend + Send + Sync> {
    match lang {
        Language::Go => Box::new(GoFrontend::new()),
        Language::Rust => Box::new(RustFrontend::new()),
    }
}
