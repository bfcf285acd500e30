use crate::parse::CommentFrontend;
use crate::tag::CommentSyntax;

/// Extracts comment groups from Rust sources, doc comments included.
pub struct RustFrontend;

impl RustFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentFrontend for RustFrontend {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn comment_query(&self) -> &'static str {
        "[(line_comment) (block_comment)] @comment"
    }

    fn comment_syntax(&self) -> CommentSyntax {
        CommentSyntax::RUST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{classify, Classification, TagMatching};
    use std::path::Path;

    #[test]
    fn doc_comments_on_struct_form_one_group() {
        let source = br#"/// service:name Billing
/// description: Charges customers
/// system: payments
pub struct Billing;
"#;
        let groups = RustFrontend::new()
            .extract_comment_groups(source, Path::new("lib.rs"))
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].location.line, 1);

        match classify(&groups[0].text, groups[0].syntax, TagMatching::Substring) {
            Classification::Service(lines) => {
                assert!(lines.contains(&"service:name Billing".to_string()));
                assert!(lines.contains(&"system: payments".to_string()));
            }
            other => panic!("expected service declaration, got {other:?}"),
        }
    }

    #[test]
    fn block_comment_with_leading_stars() {
        let source = br#"/**
 * service:uses Redis
 * technology:redis
 */
pub struct Cache;
"#;
        let groups = RustFrontend::new()
            .extract_comment_groups(source, Path::new("cache.rs"))
            .unwrap();
        assert_eq!(groups.len(), 1);

        match classify(&groups[0].text, groups[0].syntax, TagMatching::Substring) {
            Classification::Relationship(lines) => {
                assert!(lines.contains(&"service:uses Redis".to_string()));
                assert!(lines.contains(&"technology:redis".to_string()));
            }
            other => panic!("expected relationship declaration, got {other:?}"),
        }
    }

    #[test]
    fn separate_blocks_stay_separate() {
        let source = br#"// service:name A

// service:uses B
fn main() {}
"#;
        let groups = RustFrontend::new()
            .extract_comment_groups(source, Path::new("main.rs"))
            .unwrap();
        assert_eq!(groups.len(), 2);
    }
}
