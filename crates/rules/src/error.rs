use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error produced when a rule cannot be built from its configuration.
///
/// Every variant preserves the offending pattern or path so callers can
/// surface actionable diagnostics. Rules never fail at query time; all of
/// these are construction-time errors.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A glob pattern could not be compiled into a matcher.
    #[error("failed to compile glob pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The pattern that failed to compile.
        pattern: String,
        /// Underlying glob compilation error.
        source: globset::Error,
    },

    /// A gitignore pattern line could not be translated into a matcher.
    #[error("failed to translate gitignore pattern '{pattern}': {source}")]
    InvalidGitignore {
        /// The pattern line that failed to translate.
        pattern: String,
        /// Underlying regex compilation error.
        source: regex::Error,
    },

    /// A gitignore file could not be read.
    #[error("failed to read gitignore file '{}': {source}", path.display())]
    GitignoreRead {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// No gitignore path was supplied and the conventional default is absent.
    #[error("no gitignore path supplied and '{}' does not exist", default.display())]
    MissingGitignore {
        /// The default location that was probed.
        default: PathBuf,
    },

    /// A composite descriptor supplied no sub-rules.
    #[error("composite rule configuration requires a non-empty rule list")]
    EmptyComposite,

    /// A reserved rule keyword was not recognised.
    #[error("unknown rule keyword '{0}'")]
    UnknownKeyword(String),

    /// A rule configuration document could not be deserialised.
    #[error("invalid rule configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::RuleError;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn invalid_glob_preserves_pattern_and_source() {
        let source = globset::Glob::new("[").unwrap_err();
        let error = RuleError::InvalidGlob {
            pattern: "[".into(),
            source,
        };
        assert!(error.to_string().contains("failed to compile"));
        assert!(error.to_string().contains('['));
        assert!(error.source().is_some());
    }

    #[test]
    fn missing_gitignore_names_default_location() {
        let error = RuleError::MissingGitignore {
            default: PathBuf::from("./.gitignore"),
        };
        assert!(error.to_string().contains("./.gitignore"));
    }
}
