use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::{Rule, RuleError};

/// Matches queries against shell-glob include and exclude pattern lists.
///
/// Patterns use `fnmatch`-style semantics: `*` matches any run of characters
/// (path separators included), `?` matches a single character, and
/// `[...]`/`[!...]` are character classes. The include list defaults to
/// `["*"]` (match everything) and the exclude list defaults to empty.
///
/// The decision policy is closed-world: an exclude match always wins, and a
/// query matching neither list is treated as excluded. This keeps directory
/// filtering conservative when callers supply only an include list.
///
/// # Examples
///
/// ```
/// use rules::{GlobRule, Rule};
///
/// let rule = GlobRule::new(
///     Some(vec!["*.txt".into()]),
///     Some(vec!["*.log".into()]),
/// ).expect("patterns compile");
///
/// assert!(rule.matches("test.txt"));
/// assert!(!rule.matches("test.log"));
/// assert!(!rule.matches("test.rs"));
/// ```
#[derive(Debug)]
pub struct GlobRule {
    include: PatternSet,
    exclude: PatternSet,
}

impl GlobRule {
    /// Builds a rule from optional include and exclude pattern lists.
    ///
    /// `None` falls back to the defaults described on the type. Returns
    /// [`RuleError::InvalidGlob`] when a pattern fails to compile.
    pub fn new(
        include_patterns: Option<Vec<String>>,
        exclude_patterns: Option<Vec<String>>,
    ) -> Result<Self, RuleError> {
        let include = include_patterns.unwrap_or_else(|| vec!["*".to_owned()]);
        let exclude = exclude_patterns.unwrap_or_default();
        debug!(
            include = include.len(),
            exclude = exclude.len(),
            "compiling glob rule"
        );
        Ok(Self {
            include: PatternSet::compile(include)?,
            exclude: PatternSet::compile(exclude)?,
        })
    }

    /// Returns the include patterns as supplied at construction.
    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        &self.include.patterns
    }

    /// Returns the exclude patterns as supplied at construction.
    #[must_use]
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude.patterns
    }
}

impl Rule for GlobRule {
    fn is_include(&self, query: &str) -> bool {
        self.include.is_match(query)
    }

    fn is_exclude(&self, query: &str) -> bool {
        self.exclude.is_match(query)
    }

    fn matches(&self, query: &str) -> bool {
        if self.is_exclude(query) {
            return false;
        }
        self.is_include(query)
    }
}

/// A compiled glob list retaining its source patterns for diagnostics.
#[derive(Debug)]
struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternSet {
    fn compile(patterns: Vec<String>) -> Result<Self, RuleError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            // literal_separator stays off so `*` crosses `/`, matching
            // fnmatch semantics rather than path-aware globbing.
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
                .map_err(|source| RuleError::InvalidGlob {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| RuleError::InvalidGlob {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { patterns, set })
    }

    fn is_match(&self, query: &str) -> bool {
        self.set.is_match(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_and_exclude_lists() {
        let rule = GlobRule::new(
            Some(vec!["*.txt".into()]),
            Some(vec!["*.log".into()]),
        )
        .unwrap();
        assert!(rule.matches("test.txt"));
        assert!(!rule.matches("test.log"));
    }

    #[test]
    fn character_classes() {
        let rule = GlobRule::new(Some(vec!["[a-c].txt".into()]), None).unwrap();
        assert!(rule.matches("a.txt"));
        assert!(!rule.matches("d.txt"));
    }

    #[test]
    fn negated_character_class() {
        let rule = GlobRule::new(Some(vec!["[!a].txt".into()]), None).unwrap();
        assert!(rule.matches("b.txt"));
        assert!(!rule.matches("a.txt"));
    }

    #[test]
    fn default_include_matches_everything() {
        let rule = GlobRule::new(None, None).unwrap();
        assert!(rule.matches("anything-at-all"));
        assert!(rule.is_include("anything-at-all"));
        assert!(!rule.is_exclude("anything-at-all"));
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        let rule = GlobRule::new(
            Some(vec!["*.py".into()]),
            Some(vec!["test_*.py".into()]),
        )
        .unwrap();
        assert!(rule.is_include("test_example.py"));
        assert!(rule.is_exclude("test_example.py"));
        assert!(!rule.matches("test_example.py"));
    }

    #[test]
    fn unmatched_query_is_excluded() {
        let rule = GlobRule::new(Some(vec!["*.py".into()]), None).unwrap();
        assert!(!rule.matches("notes.txt"));
    }

    #[test]
    fn star_crosses_path_separators() {
        let rule = GlobRule::new(Some(vec!["*.py".into()]), None).unwrap();
        assert!(rule.matches("src/deep/nested/module.py"));
    }

    #[test]
    fn malformed_pattern_fails_at_construction() {
        let error = GlobRule::new(Some(vec!["[".into()]), None).unwrap_err();
        assert!(matches!(error, RuleError::InvalidGlob { .. }));
    }
}
