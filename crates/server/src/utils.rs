//! # Server Utilities
//!
//! Shared helpers for request handlers.

/// Escape SQL LIKE wildcards in user-supplied search input.
///
/// Escapes `\`, `%`, and `_` so they match literally.
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards_plain() {
        assert_eq!(escape_like_wildcards("rust"), "rust");
    }

    #[test]
    fn test_escape_like_wildcards_percent() {
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
    }

    #[test]
    fn test_escape_like_wildcards_underscore() {
        assert_eq!(escape_like_wildcards("snake_case"), "snake\\_case");
    }

    #[test]
    fn test_escape_like_wildcards_backslash_first() {
        assert_eq!(escape_like_wildcards("a\\%b"), "a\\\\\\%b");
    }

    #[test]
    fn test_escape_like_wildcards_empty() {
        assert_eq!(escape_like_wildcards(""), "");
    }
}
