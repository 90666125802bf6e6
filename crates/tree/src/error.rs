use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by tree construction and mutation.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A directory could not be listed or a file could not be read.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path of the entry that failed.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// A name pattern handed to a mutator failed to compile.
    #[error("invalid name pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob compilation error.
        source: globset::Error,
    },

    /// The rename primitive was given a mode string it does not know.
    #[error("invalid rename mode {0:?} (expected \"add\" or \"replace\")")]
    InvalidRenameMode(String),

    /// A node index out of range was passed to a mutator.
    #[error("node index {index} out of range for tree of {len} nodes")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Current node count.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let error = TreeError::InvalidRenameMode("merge".into());
        assert!(error.to_string().contains("merge"));

        let error = TreeError::IndexOutOfRange { index: 9, len: 3 };
        assert!(error.to_string().contains('9'));
    }
}
