use crate::Rule;

/// Excludes dot-prefixed (hidden) file and directory names.
///
/// The query is expected to be a leaf name, not a full path; a query such as
/// `./src/file.rs` would trip the dot-prefix check on the leading `./`.
///
/// # Examples
///
/// ```
/// use rules::{HiddenFileRule, Rule};
///
/// assert!(HiddenFileRule.matches("visible.py"));
/// assert!(!HiddenFileRule.matches(".hidden.py"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HiddenFileRule;

impl Rule for HiddenFileRule {
    fn is_include(&self, query: &str) -> bool {
        !query.starts_with('.')
    }

    fn is_exclude(&self, query: &str) -> bool {
        query.starts_with('.')
    }

    fn matches(&self, query: &str) -> bool {
        self.is_include(query)
    }
}
