use crate::dependency::Dependency;

use super::DeriveContext;

/// Accepts a dependency whose `groupId:artifactId` matches a glob-style
/// pattern, where `*` stands for any run of characters in either segment.
///
/// Depth-independent: `derive_child` returns an identical selector, since a
/// coordinate pattern means the same thing at every recursion depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternDependencySelector {
    group_pattern: String,
    artifact_pattern: String,
}

impl PatternDependencySelector {
    /// `pattern` is `groupId:artifactId`, each segment optionally containing
    /// `*` wildcards, e.g. `"org.example:*"` or `"*:*-test"`.
    pub fn new(pattern: &str) -> Self {
        let (group_pattern, artifact_pattern) = pattern.split_once(':').unwrap_or((pattern, "*"));
        Self {
            group_pattern: group_pattern.to_string(),
            artifact_pattern: artifact_pattern.to_string(),
        }
    }

    pub fn select(&self, dep: &Dependency) -> bool {
        glob_match(&self.group_pattern, &dep.artifact.coordinate.group_id)
            && glob_match(&self.artifact_pattern, &dep.artifact.coordinate.artifact_id)
    }

    pub fn derive_child(&self, _context: &DeriveContext<'_>) -> Self {
        self.clone()
    }
}

/// A minimal `*`-only glob matcher: any number of `*` segments, no other
/// wildcard syntax.
fn glob_match(pattern: &str, value: &str) -> bool {
    let mut parts = pattern.split('*').peekable();
    let Some(first) = parts.next() else {
        return true;
    };
    if !value.starts_with(first) {
        return false;
    }
    let mut cursor = first.len();
    let has_wildcard = pattern.contains('*');
    while let Some(part) = parts.next() {
        if part.is_empty() {
            continue;
        }
        match value[cursor..].find(part) {
            Some(offset) => cursor += offset + part.len(),
            None => return false,
        }
        if parts.peek().is_none() && !part.is_empty() && !value.ends_with(part) {
            return false;
        }
    }
    has_wildcard || cursor == value.len()
}
