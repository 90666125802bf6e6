use std::str::FromStr;

use crate::TreeError;

/// How [`Tree::update_node`] combines the supplied rename string with the
/// node's current name.
///
/// [`Tree::update_node`]: crate::Tree::update_node
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenameMode {
    /// Apply the asterisk-substitution convention to the current name.
    Add,
    /// Overwrite the current name wholesale.
    Replace,
}

impl FromStr for RenameMode {
    type Err = TreeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            other => Err(TreeError::InvalidRenameMode(other.to_owned())),
        }
    }
}

/// Expands a rename rule against an original name.
///
/// Every `*` in the rule is replaced by the original name; a rule without an
/// asterisk replaces the name outright.
///
/// ```
/// use tree::apply_asterisk_rule;
///
/// assert_eq!(apply_asterisk_rule("a.py", "test_*"), "test_a.py");
/// assert_eq!(apply_asterisk_rule("a.py", "fixed.py"), "fixed.py");
/// ```
#[must_use]
pub fn apply_asterisk_rule(name: &str, rule: &str) -> String {
    if rule.contains('*') {
        rule.replace('*', name)
    } else {
        rule.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_rule() {
        assert_eq!(apply_asterisk_rule("main.rs", "old_*"), "old_main.rs");
    }

    #[test]
    fn suffix_rule() {
        assert_eq!(apply_asterisk_rule("main", "*.bak"), "main.bak");
    }

    #[test]
    fn multiple_asterisks_all_expand() {
        assert_eq!(apply_asterisk_rule("x", "*_*"), "x_x");
    }

    #[test]
    fn rule_without_asterisk_replaces() {
        assert_eq!(apply_asterisk_rule("anything", "fixed"), "fixed");
    }

    #[test]
    fn mode_parses_known_strings() {
        assert_eq!("add".parse::<RenameMode>().unwrap(), RenameMode::Add);
        assert_eq!(
            "replace".parse::<RenameMode>().unwrap(),
            RenameMode::Replace
        );
    }

    #[test]
    fn mode_rejects_unknown_strings() {
        let error = "merge".parse::<RenameMode>().unwrap_err();
        assert!(matches!(error, TreeError::InvalidRenameMode(_)));
    }
}
