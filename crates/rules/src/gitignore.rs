use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};

use crate::known_dirs::is_well_known_dir;
use crate::{Rule, RuleError};

/// Reproduces git's ignore-file matching semantics from scratch.
///
/// Each non-comment, non-blank pattern line is translated into a single
/// anchored regular expression together with its negation, root-anchor, and
/// directory-only flags. Patterns are evaluated in file order with
/// last-match-wins semantics: every matching pattern overwrites the running
/// "ignored" flag, and a negated pattern (`!pattern`) clears it.
///
/// `is_exclude` reports the final ignored flag, `is_include` is its negation,
/// and `matches` returns `is_include` (an ignored path does not match).
///
/// Queries are normalised before matching: a `./` prefix is added when the
/// query is not already relative-rooted, and directory queries gain a
/// trailing `/`. When the caller does not say whether the query names a
/// directory, a deliberately weak heuristic decides (see
/// [`matches_with`](Self::matches_with)).
///
/// # Examples
///
/// ```
/// use rules::{GitignoreRule, Rule};
///
/// let rule = GitignoreRule::from_patterns(["*.log", "!import.log", "build/"])
///     .expect("patterns translate");
///
/// assert!(!rule.matches("export.log"));
/// assert!(rule.matches("import.log"));
/// assert!(!rule.matches("build"));
/// assert!(!rule.matches("build/output.bin"));
/// assert!(rule.matches("src/main.rs"));
/// ```
#[derive(Debug)]
pub struct GitignoreRule {
    patterns: Vec<IgnorePattern>,
}

impl GitignoreRule {
    /// Translates an ordered list of gitignore pattern lines.
    ///
    /// Blank lines and `#` comments are skipped; order is preserved because
    /// later patterns override earlier ones. Returns
    /// [`RuleError::InvalidGitignore`] when a line cannot be translated.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for line in patterns {
            let line = line.as_ref().trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            compiled.push(IgnorePattern::translate(line)?);
        }
        debug!(patterns = compiled.len(), "compiled gitignore rule");
        Ok(Self { patterns: compiled })
    }

    /// Loads pattern lines from a gitignore file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RuleError::GitignoreRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading gitignore file");
        Self::from_patterns(text.lines())
    }

    /// Returns the number of compiled pattern lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no pattern lines were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Like [`Rule::matches`], with an explicit directory override.
    ///
    /// When `is_dir` is `None` a weak heuristic decides: a query whose last
    /// segment has a file extension, or that has a characteristic
    /// file-wildcard shape (`*.`, trailing `.*`), is treated as a file unless
    /// it ends with a well-known tool/VCS/cache directory name; everything
    /// else defaults to directory. Callers that know the answer should pass
    /// `Some(..)` instead of trusting the hint.
    #[must_use]
    pub fn matches_with(&self, query: &str, is_dir: Option<bool>) -> bool {
        !self.ignored(query, is_dir)
    }

    /// Reports whether `query` names something that looks like a directory.
    ///
    /// This is the weak hint used when no explicit directory flag is given.
    #[must_use]
    pub fn dir_hint(query: &str) -> bool {
        let has_extension = !query.ends_with('/')
            && query.rsplit('/').next().is_some_and(|segment| segment.contains('.'));
        let wildcard_file = query.contains("*.") || query.ends_with(".*");
        if has_extension || wildcard_file {
            return is_well_known_dir(query);
        }
        true
    }

    fn ignored(&self, query: &str, is_dir: Option<bool>) -> bool {
        let is_dir = is_dir.unwrap_or_else(|| Self::dir_hint(query));
        let normalized = normalize_query(query, is_dir);
        let mut ignored = false;
        for pattern in &self.patterns {
            if pattern.matcher.is_match(&normalized) {
                ignored = !pattern.negated;
                trace!(
                    pattern = %pattern.line,
                    query = %normalized,
                    ignored,
                    "gitignore pattern matched"
                );
            }
        }
        ignored
    }
}

impl Rule for GitignoreRule {
    fn is_include(&self, query: &str) -> bool {
        !self.ignored(query, None)
    }

    fn is_exclude(&self, query: &str) -> bool {
        self.ignored(query, None)
    }

    fn matches(&self, query: &str) -> bool {
        self.is_include(query)
    }
}

/// One translated pattern line.
#[derive(Debug)]
struct IgnorePattern {
    line: String,
    negated: bool,
    matcher: Regex,
}

impl IgnorePattern {
    /// Translates one pattern line into a matching automaton.
    ///
    /// The flags are peeled off first: a leading `!` negates, a leading `/`
    /// anchors the pattern at the tree root, a trailing `/` restricts the
    /// pattern to directories. The remainder is scanned left to right into
    /// regex fragments (`**/` spans whole segments, `*`/`?` stop at `/`,
    /// character classes pass through, everything else is literal).
    fn translate(line: &str) -> Result<Self, RuleError> {
        let mut body = line;

        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        }
        let anchored = body.starts_with('/');
        if anchored {
            body = &body[1..];
        }
        let dir_only = body.ends_with('/');
        if dir_only {
            body = &body[..body.len() - 1];
        }

        let mut regex = String::from(if anchored { r"^\./" } else { r"^\./(?:.*/)?" });

        // A trailing `/*` requires a non-empty final segment, so `dir/*`
        // matches the contents of `dir` but never `dir` itself.
        let (scan, contents_only) = match body.strip_suffix("/*") {
            Some(head) if !head.ends_with('*') => (head, true),
            _ => (body, false),
        };

        regex.push_str(&translate_fragments(scan));
        if contents_only {
            regex.push_str("/[^/]+");
        }

        // Directory-only patterns demand the trailing separator that query
        // normalisation adds for directories; everything else may optionally
        // continue into descendants.
        regex.push_str(if dir_only { "/.*$" } else { "(?:/.*)?$" });

        let matcher = Regex::new(&regex).map_err(|source| RuleError::InvalidGitignore {
            pattern: line.to_owned(),
            source,
        })?;
        Ok(Self {
            line: line.to_owned(),
            negated,
            matcher,
        })
    }
}

/// Scans a flag-stripped pattern body into regex fragments.
fn translate_fragments(body: &str) -> String {
    let mut out = String::new();
    let mut rest = body;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("**/") {
            // Zero or more whole path segments.
            out.push_str("(?:[^/]+/)*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("**") {
            // Any remaining suffix, across separators.
            out.push_str(".*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('*') {
            out.push_str("[^/]*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('?') {
            out.push_str("[^/]");
            rest = tail;
        } else if rest.starts_with('[') {
            rest = copy_character_class(rest, &mut out);
        } else {
            let ch = rest.chars().next().expect("non-empty remainder");
            if matches!(ch, '.' | '+' | '(' | ')' | '{' | '}' | '^' | '$' | '|' | '\\') {
                out.push('\\');
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

/// Copies a `[...]` class through to the output, translating `[!` negation.
///
/// The class ends at the first unescaped `]`. An unterminated class is copied
/// as-is and rejected later by the regex compiler, which keeps the failure at
/// construction time.
fn copy_character_class<'a>(rest: &'a str, out: &mut String) -> &'a str {
    out.push('[');
    let mut chars = rest[1..].char_indices();
    let mut consumed = 1;
    if let Some((_, first)) = chars.next() {
        if first == '!' {
            out.push('^');
        } else {
            out.push(first);
        }
        consumed += first.len_utf8();
        if first == ']' {
            return &rest[consumed..];
        }
        let mut escaped = first == '\\';
        for (_, ch) in chars {
            out.push(ch);
            consumed += ch.len_utf8();
            if ch == ']' && !escaped {
                break;
            }
            escaped = ch == '\\' && !escaped;
        }
    }
    &rest[consumed..]
}

/// Prefixes the query with `./` and marks directories with a trailing `/`.
fn normalize_query(query: &str, is_dir: bool) -> String {
    let mut normalized = if query.starts_with("./") || query.starts_with('/') {
        query.to_owned()
    } else {
        format!("./{query}")
    };
    if is_dir && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
