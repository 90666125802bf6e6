use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CompositeRule, DirRule, GitignoreRule, GlobRule, HiddenFileRule, RuleError, RuleKind,
};

/// Conventional gitignore location probed when no path is supplied.
pub const DEFAULT_GITIGNORE: &str = "./.gitignore";

/// Reserved keyword enabling the hidden-file rule in [`RuleFactory::standard`].
pub const KEYWORD_HIDDEN_FILE: &str = "hidden_file";
/// Reserved keyword enabling the directory rule in [`RuleFactory::standard`].
pub const KEYWORD_DIR: &str = "dir";
/// Reserved keyword enabling the gitignore rule in [`RuleFactory::standard`].
pub const KEYWORD_GITIGNORE: &str = "gitignore";

/// Declarative rule descriptor.
///
/// The serialised form is a mapping with a required `type` key plus
/// type-specific keys, so an unknown `type` or a `composite` without `rules`
/// fails at deserialisation time:
///
/// ```json
/// {
///   "type": "composite",
///   "rules": [
///     { "type": "glob", "include_patterns": ["*.py"] },
///     { "type": "hidden_file" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum RuleConfig {
    /// Shell-glob include/exclude pattern lists.
    Glob {
        /// Include patterns; defaults to match-everything.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_patterns: Option<Vec<String>>,
        /// Exclude patterns; defaults to empty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude_patterns: Option<Vec<String>>,
    },
    /// Gitignore file, loaded from the given or conventional default path.
    Gitignore {
        /// Path to the ignore file; `./.gitignore` when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gitignore_path: Option<PathBuf>,
    },
    /// Dot-prefix hidden-file detection.
    HiddenFile,
    /// On-disk directory check.
    Dir,
    /// Nested list of descriptors; must be non-empty.
    Composite {
        /// Sub-rule descriptors in evaluation order.
        rules: Vec<RuleConfig>,
    },
}

/// Builds rule instances from [`RuleConfig`] descriptors.
pub struct RuleFactory;

impl RuleFactory {
    /// Builds a single rule from a descriptor.
    ///
    /// A `composite` descriptor with an empty rule list is rejected with
    /// [`RuleError::EmptyComposite`]; a `gitignore` descriptor without a path
    /// falls back to [`DEFAULT_GITIGNORE`] and fails with
    /// [`RuleError::MissingGitignore`] when that file does not exist.
    pub fn build(config: &RuleConfig) -> Result<RuleKind, RuleError> {
        match config {
            RuleConfig::Glob {
                include_patterns,
                exclude_patterns,
            } => Ok(GlobRule::new(include_patterns.clone(), exclude_patterns.clone())?.into()),
            RuleConfig::Gitignore { gitignore_path } => {
                Ok(Self::load_gitignore(gitignore_path.as_deref())?.into())
            }
            RuleConfig::HiddenFile => Ok(HiddenFileRule.into()),
            RuleConfig::Dir => Ok(DirRule.into()),
            RuleConfig::Composite { rules } => Ok(Self::build_composite(rules)?.into()),
        }
    }

    /// Builds a composite from a list of descriptors.
    pub fn build_composite(configs: &[RuleConfig]) -> Result<CompositeRule, RuleError> {
        if configs.is_empty() {
            return Err(RuleError::EmptyComposite);
        }
        debug!(rules = configs.len(), "building composite rule");
        let mut rules = Vec::with_capacity(configs.len());
        for config in configs {
            rules.push(Self::build(config)?);
        }
        Ok(CompositeRule::new(rules))
    }

    /// Builds a rule from a JSON descriptor document.
    pub fn from_json(text: &str) -> Result<RuleKind, RuleError> {
        let config: RuleConfig = serde_json::from_str(text)?;
        Self::build(&config)
    }

    /// Assembles the common rule bundle: a glob rule over the supplied
    /// include/exclude lists plus one rule per reserved keyword.
    ///
    /// Recognised keywords are [`KEYWORD_HIDDEN_FILE`], [`KEYWORD_DIR`], and
    /// [`KEYWORD_GITIGNORE`] (which loads `gitignore_path`, or the
    /// conventional default when `None`). Unknown keywords are configuration
    /// errors.
    pub fn standard<'a, I>(
        include_patterns: Option<Vec<String>>,
        exclude_patterns: Option<Vec<String>>,
        keywords: I,
        gitignore_path: Option<&Path>,
    ) -> Result<CompositeRule, RuleError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut composite = CompositeRule::default();
        composite.append(GlobRule::new(include_patterns, exclude_patterns)?);
        for keyword in keywords {
            match keyword {
                KEYWORD_HIDDEN_FILE => composite.append(HiddenFileRule),
                KEYWORD_DIR => composite.append(DirRule),
                KEYWORD_GITIGNORE => composite.append(Self::load_gitignore(gitignore_path)?),
                other => return Err(RuleError::UnknownKeyword(other.to_owned())),
            }
        }
        Ok(composite)
    }

    fn load_gitignore(path: Option<&Path>) -> Result<GitignoreRule, RuleError> {
        match path {
            Some(path) => GitignoreRule::load(path),
            None => {
                let default = Path::new(DEFAULT_GITIGNORE);
                if default.exists() {
                    GitignoreRule::load(default)
                } else {
                    Err(RuleError::MissingGitignore {
                        default: default.to_path_buf(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rule;

    #[test]
    fn builds_glob_rule() {
        let config = RuleConfig::Glob {
            include_patterns: Some(vec!["*.py".into()]),
            exclude_patterns: None,
        };
        let rule = RuleFactory::build(&config).unwrap();
        assert!(matches!(rule, RuleKind::Glob(_)));
        assert!(rule.matches("main.py"));
        assert!(!rule.matches("main.rs"));
    }

    #[test]
    fn builds_leaf_rules() {
        assert!(matches!(
            RuleFactory::build(&RuleConfig::HiddenFile).unwrap(),
            RuleKind::HiddenFile(_)
        ));
        assert!(matches!(
            RuleFactory::build(&RuleConfig::Dir).unwrap(),
            RuleKind::Dir(_)
        ));
    }

    #[test]
    fn builds_nested_composite() {
        let config = RuleConfig::Composite {
            rules: vec![
                RuleConfig::Glob {
                    include_patterns: Some(vec!["*.py".into()]),
                    exclude_patterns: None,
                },
                RuleConfig::HiddenFile,
            ],
        };
        let rule = RuleFactory::build(&config).unwrap();
        assert!(rule.matches("example.py"));
        assert!(!rule.matches(".example.py"));
    }

    #[test]
    fn empty_composite_is_rejected() {
        let error = RuleFactory::build_composite(&[]).unwrap_err();
        assert!(matches!(error, RuleError::EmptyComposite));
    }

    #[test]
    fn unknown_type_is_a_config_error() {
        let error = RuleFactory::from_json(r#"{"type": "mystery"}"#).unwrap_err();
        assert!(matches!(error, RuleError::Config(_)));
    }

    #[test]
    fn json_round_trip() {
        let text = r#"{
            "type": "composite",
            "rules": [
                {"type": "glob", "include_patterns": ["*.rs"]},
                {"type": "hidden_file"}
            ]
        }"#;
        let rule = RuleFactory::from_json(text).unwrap();
        assert!(rule.matches("lib.rs"));
        assert!(!rule.matches(".hidden.rs"));
    }

    #[test]
    fn gitignore_descriptor_with_explicit_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(".gitignore");
        std::fs::write(&path, "*.log\n").expect("write");
        let config = RuleConfig::Gitignore {
            gitignore_path: Some(path),
        };
        let rule = RuleFactory::build(&config).unwrap();
        assert!(!rule.matches("debug.log"));
        assert!(rule.matches("main.rs"));
    }

    #[test]
    fn standard_bundle_combines_keywords() {
        let rule = RuleFactory::standard(
            Some(vec!["*".into()]),
            Some(vec!["*.log".into()]),
            [KEYWORD_HIDDEN_FILE],
            None,
        )
        .unwrap();
        assert_eq!(rule.len(), 2);
        assert!(rule.matches("main.rs"));
        assert!(!rule.matches("debug.log"));
        assert!(!rule.matches(".hidden"));
    }

    #[test]
    fn standard_rejects_unknown_keyword() {
        let error =
            RuleFactory::standard(None, None, ["mystery"], None).unwrap_err();
        assert!(matches!(error, RuleError::UnknownKeyword(_)));
    }
}
