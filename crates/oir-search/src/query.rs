//! Free-text query matching
//!
//! Matching is a case-insensitive substring test. A query that is empty or
//! only whitespace is blank and matches everything.

/// Normalised free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    raw: String,
    needle: String,
}

impl TextQuery {
    /// Build a query from user input
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = if raw.trim().is_empty() {
            String::new()
        } else {
            raw.to_lowercase()
        };
        Self { raw, needle }
    }

    /// Input as typed
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased needle, empty when blank
    #[inline]
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether the query imposes no text predicate
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `field` contains the query, ignoring case
    #[must_use]
    pub fn matches(&self, field: &str) -> bool {
        self.is_blank() || field.to_lowercase().contains(&self.needle)
    }

    /// Whether any of `fields` contains the query
    #[must_use]
    pub fn matches_any<I, S>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_blank() {
            return true;
        }
        fields
            .into_iter()
            .any(|f| f.as_ref().to_lowercase().contains(&self.needle))
    }
}

impl From<&str> for TextQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TextQuery {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_matches_everything() {
        for raw in ["", "   ", "\t"] {
            let q = TextQuery::new(raw);
            assert!(q.is_blank());
            assert!(q.matches("anything"));
            assert!(q.matches_any(Vec::<&str>::new()));
        }
    }

    #[test]
    fn matching_ignores_case() {
        let q = TextQuery::new("AmWu");
        assert!(q.matches("AMWU"));
        assert!(q.matches("the amwu branch"));
        assert!(!q.matches("AMW"));
    }

    #[test]
    fn matches_any_checks_every_field() {
        let q = TextQuery::new("io-14");
        assert!(q.matches_any(["Workers Union", "IO-142"]));
        assert!(!q.matches_any(["Workers Union", "IO-201"]));
        assert!(!q.matches_any(Vec::<&str>::new()));
    }
}
