use std::path::Path;

use crate::Rule;

/// Includes queries that name a directory on disk.
///
/// Unlike the other leaf rules this is not a pure string predicate: the
/// answer depends on filesystem state at query time, so repeated invocations
/// over time can change their answer. The query must be a path that is
/// meaningful relative to the current working directory (or absolute).
#[derive(Clone, Copy, Debug, Default)]
pub struct DirRule;

impl Rule for DirRule {
    fn is_include(&self, query: &str) -> bool {
        Path::new(query).is_dir()
    }

    fn is_exclude(&self, query: &str) -> bool {
        !self.is_include(query)
    }

    fn matches(&self, query: &str) -> bool {
        self.is_include(query)
    }
}
