#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rules` provides the composable predicate engine used when materialising
//! filtered directory trees. A rule answers two primitive questions about a
//! query string (is it explicitly included, is it explicitly excluded) and
//! derives a final `matches` decision from them. The crate ships four leaf
//! rule kinds (shell-glob lists, hidden-file detection, on-disk directory
//! checks, and a from-scratch gitignore-semantics matcher) plus a composite
//! combinator that evaluates an ordered list of sub-rules.
//!
//! # Design
//!
//! - [`Rule`] is the two-query contract every rule kind implements. The
//!   derived [`matches`](Rule::matches) policy is rule-kind specific but is
//!   always a pure function of the two primitive queries.
//! - [`RuleKind`] is the closed set of tagged variants behind the contract.
//!   Dispatch happens over the enum, so composites can splice the sub-rules
//!   of an appended composite without downcasting.
//! - [`GitignoreRule`] translates each pattern line into a matching automaton
//!   itself rather than delegating to a gitignore-parsing library. Anchoring,
//!   `**`, negation, and directory-only semantics follow git's ignore rules;
//!   evaluation is last-match-wins in file order.
//! - [`RuleFactory`] builds rules (and nested composites) from the
//!   declarative [`RuleConfig`] descriptor.
//!
//! # Invariants
//!
//! - A rule that cannot evaluate a query fails at construction time, never at
//!   query time. Malformed glob or gitignore patterns surface as
//!   [`RuleError`] before the rule exists.
//! - Rules are immutable after construction, with the single exception of
//!   [`CompositeRule::append`].
//! - An empty composite matches everything (vacuous conjunction) while
//!   including and excluding nothing (empty disjunction).
//!
//! # Errors
//!
//! Construction reports [`RuleError`], preserving the offending pattern or
//! path together with the underlying source error.
//!
//! # Examples
//!
//! Combine a glob rule with the hidden-file rule and filter some names:
//!
//! ```
//! use rules::{CompositeRule, GlobRule, HiddenFileRule, Rule};
//!
//! let glob = GlobRule::new(Some(vec!["*.py".into()]), None).expect("glob compiles");
//! let mut rule = CompositeRule::new(vec![glob.into()]);
//! rule.append(HiddenFileRule);
//!
//! assert!(rule.matches("example.py"));
//! assert!(!rule.matches(".hidden.py"));
//! assert!(!rule.matches("notes.txt"));
//! ```

mod composite;
mod dir;
mod error;
mod factory;
mod gitignore;
mod glob;
mod hidden;
pub mod known_dirs;
mod rule;

pub use composite::CompositeRule;
pub use dir::DirRule;
pub use error::RuleError;
pub use factory::{
    DEFAULT_GITIGNORE, KEYWORD_DIR, KEYWORD_GITIGNORE, KEYWORD_HIDDEN_FILE, RuleConfig,
    RuleFactory,
};
pub use gitignore::GitignoreRule;
pub use glob::GlobRule;
pub use hidden::HiddenFileRule;
pub use rule::{Rule, RuleKind};
