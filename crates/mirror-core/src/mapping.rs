//! Source path prefix rewriting
//!
//! The media server reports paths as it sees them. Rules rewrite those into
//! the paths under which the same files are mounted locally.

use serde::{Deserialize, Serialize};

/// One prefix rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRule {
    /// Prefix as reported by the media server
    pub from: String,
    /// Local replacement for the prefix
    pub to: String,
}

impl PathRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Ordered list of prefix rules. The first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapper {
    rules: Vec<PathRule>,
}

impl PathMapper {
    pub fn new(rules: Vec<PathRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    /// Rewrite `path` with the first rule whose prefix matches.
    ///
    /// Matching is textual: a rule for `/a` also matches `/abc`. Only the
    /// matched prefix is replaced; later occurrences are left alone.
    pub fn map(&self, path: &str) -> String {
        map_path(path, &self.rules)
    }
}

/// Rewrite `path` with the first rule in `rules` whose prefix matches.
pub fn map_path(path: &str, rules: &[PathRule]) -> String {
    rules
        .iter()
        .find_map(|rule| {
            path.strip_prefix(rule.from.as_str())
                .map(|rest| format!("{}{}", rule.to, rest))
        })
        .unwrap_or_else(|| path.to_string())
}
