use crate::parse::CommentFrontend;
use crate::tag::CommentSyntax;

/// Extracts comment groups from Go sources.
pub struct GoFrontend;

impl GoFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentFrontend for GoFrontend {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn comment_query(&self) -> &'static str {
        "(comment) @comment"
    }

    fn comment_syntax(&self) -> CommentSyntax {
        CommentSyntax::GO
    }
}
