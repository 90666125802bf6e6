use crate::{Rule, RuleKind};

/// Combines an ordered list of sub-rules into one decision.
///
/// `matches` is the conjunction of every sub-rule's `matches` (all must agree
/// to keep an entry), while `is_include` and `is_exclude` are disjunctions
/// (any sub-rule may speak up). An empty composite therefore matches
/// everything and includes/excludes nothing.
///
/// Sub-rules may themselves be composites, giving nested boolean trees.
/// [`append`](Self::append) flattens one level: appending a composite splices
/// its sub-rules in place rather than nesting it.
///
/// # Examples
///
/// ```
/// use rules::{CompositeRule, GlobRule, HiddenFileRule, Rule};
///
/// let glob = GlobRule::new(Some(vec!["*.py".into()]), None).expect("glob compiles");
/// let rule = CompositeRule::new(vec![glob.into(), HiddenFileRule.into()]);
///
/// assert!(rule.matches("test.py"));
/// assert!(!rule.matches(".hidden.py"));
/// ```
#[derive(Debug, Default)]
pub struct CompositeRule {
    rules: Vec<RuleKind>,
}

impl CompositeRule {
    /// Creates a composite over the supplied sub-rules.
    #[must_use]
    pub fn new(rules: Vec<RuleKind>) -> Self {
        Self { rules }
    }

    /// Appends a rule, splicing in the sub-rules of an appended composite.
    pub fn append(&mut self, rule: impl Into<RuleKind>) {
        match rule.into() {
            RuleKind::Composite(composite) => self.rules.extend(composite.rules),
            other => self.rules.push(other),
        }
    }

    /// Returns the sub-rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleKind] {
        &self.rules
    }

    /// Returns the number of direct sub-rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the composite holds no sub-rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule for CompositeRule {
    fn is_include(&self, query: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_include(query))
    }

    fn is_exclude(&self, query: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_exclude(query))
    }

    fn matches(&self, query: &str) -> bool {
        self.rules.iter().all(|rule| rule.matches(query))
    }
}
