use std::fmt;
use std::sync::Arc;

/// A DNS suffix that restricts which resolver group applies to a query name.
///
/// Stored lowercase without the trailing root dot, so `Corp.Example.` and
/// `corp.example` are the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainScope(Arc<str>);

impl DomainScope {
    /// Returns `None` for an empty (or root-only) domain: such entries are
    /// unscoped and belong to the default chain.
    pub fn new(domain: &str) -> Option<Self> {
        let normalized = normalize(domain);
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized.to_ascii_lowercase().into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive, label-boundary suffix match.
    ///
    /// `name` matches when it equals the scope or ends with `"." + scope`.
    pub fn matches(&self, name: &str) -> bool {
        let name = normalize(name);
        let suffix = self.as_str();

        if name.len() < suffix.len() {
            return false;
        }

        let split = name.len() - suffix.len();
        // Multi-byte characters never appear in a scope, but a query name could
        // carry them; never slice through one.
        if !name.is_char_boundary(split) {
            return false;
        }

        let (head, tail) = name.split_at(split);
        if !tail.eq_ignore_ascii_case(suffix) {
            return false;
        }

        head.is_empty() || head.ends_with('.')
    }
}

impl fmt::Display for DomainScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(domain: &str) -> &str {
    domain.trim().trim_end_matches('.')
}
