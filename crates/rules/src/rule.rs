use crate::{CompositeRule, DirRule, GitignoreRule, GlobRule, HiddenFileRule};

/// Predicate contract shared by every rule kind.
///
/// A rule answers two primitive queries, explicit inclusion and explicit
/// exclusion, and derives its final [`matches`](Rule::matches) decision from
/// them. The derivation policy differs per rule kind but never consults
/// hidden state: for the same query, the same pair of primitive answers
/// always yields the same decision.
pub trait Rule {
    /// Returns `true` if `query` is positively matched by the rule's include
    /// criteria.
    fn is_include(&self, query: &str) -> bool;

    /// Returns `true` if `query` is positively matched by the rule's exclude
    /// criteria.
    fn is_exclude(&self, query: &str) -> bool;

    /// Returns the rule's final keep/drop decision for `query`.
    fn matches(&self, query: &str) -> bool;
}

/// Closed set of rule variants understood by the engine.
///
/// Composites own their sub-rules as `RuleKind` values, which keeps the rule
/// tree an ordinary owned data structure (no trait-object downcasting is
/// needed when [`CompositeRule::append`] splices a nested composite).
#[derive(Debug)]
pub enum RuleKind {
    /// Shell-glob include/exclude pattern lists.
    Glob(GlobRule),
    /// Dot-prefix hidden file detection.
    HiddenFile(HiddenFileRule),
    /// On-disk directory check.
    Dir(DirRule),
    /// Gitignore-semantics pattern file.
    Gitignore(GitignoreRule),
    /// Ordered combination of sub-rules.
    Composite(CompositeRule),
}

impl Rule for RuleKind {
    fn is_include(&self, query: &str) -> bool {
        match self {
            Self::Glob(rule) => rule.is_include(query),
            Self::HiddenFile(rule) => rule.is_include(query),
            Self::Dir(rule) => rule.is_include(query),
            Self::Gitignore(rule) => rule.is_include(query),
            Self::Composite(rule) => rule.is_include(query),
        }
    }

    fn is_exclude(&self, query: &str) -> bool {
        match self {
            Self::Glob(rule) => rule.is_exclude(query),
            Self::HiddenFile(rule) => rule.is_exclude(query),
            Self::Dir(rule) => rule.is_exclude(query),
            Self::Gitignore(rule) => rule.is_exclude(query),
            Self::Composite(rule) => rule.is_exclude(query),
        }
    }

    fn matches(&self, query: &str) -> bool {
        match self {
            Self::Glob(rule) => rule.matches(query),
            Self::HiddenFile(rule) => rule.matches(query),
            Self::Dir(rule) => rule.matches(query),
            Self::Gitignore(rule) => rule.matches(query),
            Self::Composite(rule) => rule.matches(query),
        }
    }
}

impl From<GlobRule> for RuleKind {
    fn from(rule: GlobRule) -> Self {
        Self::Glob(rule)
    }
}

impl From<HiddenFileRule> for RuleKind {
    fn from(rule: HiddenFileRule) -> Self {
        Self::HiddenFile(rule)
    }
}

impl From<DirRule> for RuleKind {
    fn from(rule: DirRule) -> Self {
        Self::Dir(rule)
    }
}

impl From<GitignoreRule> for RuleKind {
    fn from(rule: GitignoreRule) -> Self {
        Self::Gitignore(rule)
    }
}

impl From<CompositeRule> for RuleKind {
    fn from(rule: CompositeRule) -> Self {
        Self::Composite(rule)
    }
}
