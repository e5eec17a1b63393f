//! Base-module filtering and normalization of import literals

use crate::models::config::MatchMode;

/// Strip surrounding quote characters from an import path literal
pub fn unquote(literal: &str) -> &str {
    literal.trim_matches(|c| c == '"' || c == '`')
}

/// Decides which imports are internal and turns them into graph node ids
#[derive(Debug, Clone)]
pub struct ImportFilter {
    base: String,
    prefix: String,
    mode: MatchMode,
}

impl ImportFilter {
    /// Create a filter for `base` using the given match mode
    pub fn new(base: impl Into<String>, mode: MatchMode) -> Self {
        let base = base.into();
        let prefix = format!("{}/", base);
        Self { base, prefix, mode }
    }

    /// The configured base module
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the literal belongs to the base module
    pub fn matches(&self, literal: &str) -> bool {
        let path = unquote(literal);
        match self.mode {
            MatchMode::Substring => path.contains(&self.base),
            MatchMode::SegmentPrefix => path == self.base || path.starts_with(&self.prefix),
        }
    }

    /// Module-relative identifier for a literal: quotes trimmed, then
    /// `base + "/"` stripped once if it leads the path
    pub fn normalize<'a>(&self, literal: &'a str) -> &'a str {
        let path = unquote(literal);
        path.strip_prefix(self.prefix.as_str()).unwrap_or(path)
    }

    /// Graph target for a literal, or `None` when it is external
    pub fn target(&self, literal: &str) -> Option<String> {
        self.matches(literal).then(|| self.normalize(literal).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_quotes_are_stripped_exactly() {
        let filter = ImportFilter::new("modbase", MatchMode::Substring);
        assert_eq!(filter.target("\"modbase/pkgB\""), Some("pkgB".to_string()));
        assert_eq!(filter.target("\"modbase/a/b/c\""), Some("a/b/c".to_string()));
        assert_eq!(filter.target("`modbase/raw`"), Some("raw".to_string()));
    }

    #[test]
    fn test_external_imports_are_dropped() {
        let filter = ImportFilter::new("example.com/app", MatchMode::Substring);
        assert_eq!(filter.target("\"fmt\""), None);
        assert_eq!(filter.target("\"github.com/baz/qux\""), None);
    }

    #[test]
    fn test_substring_semantics() {
        let filter = ImportFilter::new("foo", MatchMode::Substring);

        assert_eq!(
            filter.target("\"github.com/foo/bar\""),
            Some("github.com/foo/bar".to_string())
        );
        // Any literal containing the base is admitted, related or not.
        assert_eq!(
            filter.target("\"github.com/notfoo/bar\""),
            Some("github.com/notfoo/bar".to_string())
        );
        assert_eq!(filter.target("\"github.com/baz/qux\""), None);
    }

    #[test]
    fn test_segment_prefix_semantics() {
        let filter = ImportFilter::new("example.com/app", MatchMode::SegmentPrefix);

        assert_eq!(filter.target("\"example.com/app/store\""), Some("store".to_string()));
        assert_eq!(filter.target("\"example.com/app\""), Some("example.com/app".to_string()));
        assert_eq!(filter.target("\"example.com/apple/store\""), None);
        assert_eq!(filter.target("\"vendor/example.com/app/store\""), None);
    }

    #[test]
    fn test_base_itself_is_kept_verbatim() {
        let filter = ImportFilter::new("modbase", MatchMode::Substring);
        assert_eq!(filter.target("\"modbase\""), Some("modbase".to_string()));
    }

    #[test]
    fn test_prefix_stripped_only_once() {
        let filter = ImportFilter::new("m", MatchMode::Substring);
        assert_eq!(filter.normalize("\"m/m/x\""), "m/x");
    }
}
