use std::path::Path;

pub const IGNORE_FILE_NAME: &str = ".servicefileignore";

/// Exclude patterns from the nearest `.servicefileignore`, searching upward
/// from `start`. Blank lines and `#` comments are skipped.
pub fn load_ignore_patterns(start: &Path) -> Vec<String> {
    start
        .ancestors()
        .map(|dir| dir.join(IGNORE_FILE_NAME))
        .find(|path| path.is_file())
        .and_then(|path| {
            tracing::debug!("Loading ignore patterns from {}", path.display());
            std::fs::read_to_string(path).ok()
        })
        .map(|content| parse_ignore_patterns(&content))
        .unwrap_or_default()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}
