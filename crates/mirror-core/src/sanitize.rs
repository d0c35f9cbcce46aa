//! Display name to link name conversion

/// Suffix carried by every managed link, kept for compatibility with
/// mirrors created by earlier tooling.
pub const LINK_SUFFIX: &str = ".lnk";

/// Replace every character outside the allowed set with `_`, then trim
/// surrounding whitespace.
///
/// Allowed: alphanumerics, whitespace, `(`, `)`, `{`, `}` and `-`. The
/// function is total and idempotent. Distinct names can collide, e.g.
/// `"Alien: Romulus"` and `"Alien? Romulus"` both become `"Alien_ Romulus"`.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect();
    replaced.trim().to_string()
}

/// File name of the link for an item called `name`.
///
/// `None` when nothing is left after sanitizing.
pub fn link_name(name: &str) -> Option<String> {
    let sanitized = sanitize(name);
    if sanitized.is_empty() {
        None
    } else {
        Some(format!("{}{}", sanitized, LINK_SUFFIX))
    }
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_path_separators() {
        assert_eq!(sanitize("AC/DC: Live"), "AC_DC_ Live");
        assert_eq!(sanitize("..\\escape"), "___escape");
    }

    #[test]
    fn test_keeps_allowed_punctuation() {
        assert_eq!(sanitize("Heat (1995) {tmdb-949}"), "Heat (1995) {tmdb-949}");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  Dune  "), "Dune");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(sanitize("Amélie"), "Amélie");
        assert_eq!(sanitize("千と千尋の神隠し"), "千と千尋の神隠し");
    }

    #[test]
    fn test_link_name() {
        assert_eq!(link_name("Movie One").as_deref(), Some("Movie One.lnk"));
        assert_eq!(link_name(" \t "), None);
    }
}
