use crate::errors::DomainError;
use std::fmt;
use std::sync::Arc;

const WILDCARD_PREFIX: &str = "*.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Matches exactly one name.
    Exact(String),
    /// `*.<suffix>`: matches names strictly below the suffix, never the suffix itself.
    Wildcard(String),
}

/// A domain pattern taken from a router address-list name.
///
/// `list` is the address-list the router rule refers to; entries for matches
/// of this pattern are written to that list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchPattern {
    list: Arc<str>,
    kind: PatternKind,
    rendered: String,
}

impl WatchPattern {
    /// Parses an ASCII pattern (`example.com` or `*.example.com`). The list
    /// name is the normalized pattern itself.
    pub fn parse(pattern: &str) -> Result<Self, DomainError> {
        let kind = Self::parse_kind(pattern)?;
        let rendered = render(&kind);
        Ok(Self {
            list: Arc::from(rendered.as_str()),
            kind,
            rendered,
        })
    }

    /// Builds a pattern whose address-list name differs from its matching form,
    /// e.g. a router list named with unicode labels.
    pub fn with_list(list: impl Into<Arc<str>>, pattern: &str) -> Result<Self, DomainError> {
        let kind = Self::parse_kind(pattern)?;
        Ok(Self {
            list: list.into(),
            rendered: render(&kind),
            kind,
        })
    }

    fn parse_kind(pattern: &str) -> Result<PatternKind, DomainError> {
        let normalized = pattern.trim().trim_end_matches('.').to_ascii_lowercase();
        let (wildcard, body) = match normalized.strip_prefix(WILDCARD_PREFIX) {
            Some(rest) => (true, rest.to_string()),
            None => (false, normalized),
        };

        if body.is_empty() || body.contains('*') || body.starts_with('.') {
            return Err(DomainError::InvalidDomainName(pattern.to_string()));
        }

        Ok(if wildcard {
            PatternKind::Wildcard(body)
        } else {
            PatternKind::Exact(body)
        })
    }

    /// Normalized matching form: `google.com` or `*.google.com`.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn shared_list(&self) -> Arc<str> {
        Arc::clone(&self.list)
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, PatternKind::Wildcard(_))
    }

    /// `name` must already be normalized (lowercase, no trailing dot).
    pub fn matches(&self, name: &str) -> bool {
        match &self.kind {
            PatternKind::Exact(fqdn) => name == fqdn,
            PatternKind::Wildcard(suffix) => {
                name.len() > suffix.len() + 1
                    && name.ends_with(suffix.as_str())
                    && name.as_bytes()[name.len() - suffix.len() - 1] == b'.'
            }
        }
    }
}

fn render(kind: &PatternKind) -> String {
    match kind {
        PatternKind::Exact(fqdn) => fqdn.clone(),
        PatternKind::Wildcard(suffix) => format!("{WILDCARD_PREFIX}{suffix}"),
    }
}

impl fmt::Display for WatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Immutable snapshot of the patterns currently being watched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<WatchPattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<WatchPattern>) -> Self {
        Self { patterns }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Convenience for fixtures and static configuration; invalid entries are skipped.
    pub fn from_strs<S: AsRef<str>>(patterns: &[S]) -> Self {
        patterns
            .iter()
            .filter_map(|p| WatchPattern::parse(p.as_ref()).ok())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<WatchPattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = WatchPattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_root_dot() {
        let pattern = WatchPattern::parse("Example.COM.").unwrap();
        assert_eq!(pattern.kind(), &PatternKind::Exact("example.com".to_string()));
        assert_eq!(pattern.list(), "example.com");
    }

    #[test]
    fn test_parse_rejects_degenerate_patterns() {
        assert!(WatchPattern::parse("").is_err());
        assert!(WatchPattern::parse("*.").is_err());
        assert!(WatchPattern::parse("*.*.example.com").is_err());
        assert!(WatchPattern::parse("a.*.example.com").is_err());
    }

    #[test]
    fn test_wildcard_display_keeps_prefix() {
        let pattern = WatchPattern::parse("*.example.com").unwrap();
        assert!(pattern.is_wildcard());
        assert_eq!(pattern.as_str(), "*.example.com");
        assert_eq!(pattern.to_string(), "*.example.com");
        assert_eq!(pattern.list(), "*.example.com");
    }

    #[test]
    fn test_with_list_keeps_router_name() {
        let pattern = WatchPattern::with_list("bücher.de", "xn--bcher-kva.de").unwrap();
        assert_eq!(pattern.list(), "bücher.de");
        assert_eq!(pattern.as_str(), "xn--bcher-kva.de");
        assert!(pattern.matches("xn--bcher-kva.de"));
    }
}
