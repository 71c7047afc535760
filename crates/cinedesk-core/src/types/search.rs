//! Free-text search input shared by list filters.

use serde::{Deserialize, Serialize};

/// A non-empty, trimmed search term.
///
/// Constructed only through [`SearchTerm::parse`], so a filter holding
/// `Some(SearchTerm)` always has something to match on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalize raw user input; blank input yields `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
    }

    /// The trimmed term as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a `%term%` pattern for `ILIKE`, escaping LIKE metacharacters.
    pub fn ilike_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.0.len() + 2);
        escaped.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_none() {
        assert!(SearchTerm::parse(None).is_none());
        assert!(SearchTerm::parse(Some("   ")).is_none());
    }

    #[test]
    fn test_trims() {
        let term = SearchTerm::parse(Some("  matrix ")).expect("term");
        assert_eq!(term.as_str(), "matrix");
        assert_eq!(term.ilike_pattern(), "%matrix%");
    }

    #[test]
    fn test_escapes_wildcards() {
        let term = SearchTerm::parse(Some("100%_off")).expect("term");
        assert_eq!(term.ilike_pattern(), "%100\\%\\_off%");
    }
}
