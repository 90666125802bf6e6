use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by single-file export.
#[derive(Debug, Error)]
pub enum SingleFileError {
    /// The header template is missing the `{file_name}` placeholder.
    #[error("template must contain the {{file_name}} placeholder")]
    MissingPlaceholder,

    /// Building or classifying the underlying tree failed.
    #[error(transparent)]
    Tree(#[from] tree::TreeError),

    /// A file could not be read during rendering, or the output could not be
    /// written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
}
