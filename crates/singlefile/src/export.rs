use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tree::{ContentKind, Tree};

use crate::SingleFileError;

/// Placeholder the header template must contain.
pub const PLACEHOLDER: &str = "{file_name}";

/// Default three-line header written before each file's contents.
pub const DEFAULT_TEMPLATE: &str = "%%%%%%%%%%\nfile: {file_name}\n%%%%%%%%%%\n";

/// Default output path for [`SingleFile::write`].
pub const DEFAULT_OUTPUT: &str = "onefile.txt";

/// Width of the line-number column, colon excluded.
pub(crate) const LINENO_PADDING_WIDTH: usize = 6;

/// Concatenates every text file of a tree into one annotated document.
///
/// Each text-classified file node contributes an instantiated header followed
/// by the file's contents; binary files and directories are omitted. The
/// inverse operation is [`parse`](crate::parse).
#[derive(Debug)]
pub struct SingleFile {
    tree: Tree,
    template: String,
    output_path: PathBuf,
}

impl SingleFile {
    /// Wraps a tree, classifying its contents first.
    ///
    /// Classification reads a prefix of every file node, so the tree's paths
    /// must still be valid on disk.
    pub fn new(mut tree: Tree) -> Result<Self, SingleFileError> {
        tree.classify_contents()?;
        Ok(Self {
            tree,
            template: DEFAULT_TEMPLATE.to_owned(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        })
    }

    /// Replaces the header template.
    ///
    /// The template must contain the [`PLACEHOLDER`]; a template without it
    /// could not be parsed back into per-file sections.
    pub fn template(mut self, template: impl Into<String>) -> Result<Self, SingleFileError> {
        let template = template.into();
        if !template.contains(PLACEHOLDER) {
            return Err(SingleFileError::MissingPlaceholder);
        }
        self.template = template;
        Ok(self)
    }

    /// Replaces the output path used by [`write`](Self::write).
    #[must_use]
    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }

    /// Returns the wrapped tree.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Renders the document, optionally prefixing each line with its number.
    pub fn render(&self, line_numbers: bool) -> Result<String, SingleFileError> {
        let mut out = String::new();
        let mut exported = 0usize;
        for node in self.tree.nodes() {
            if node.content != Some(ContentKind::Text) {
                continue;
            }
            let text = fs::read_to_string(&node.path).map_err(|source| SingleFileError::Io {
                path: PathBuf::from(&node.path),
                source,
            })?;
            out.push_str(&self.template.replace(PLACEHOLDER, &node.path));
            if line_numbers {
                for (lineno, line) in text.lines().enumerate() {
                    let number = lineno.to_string();
                    let padding = LINENO_PADDING_WIDTH.saturating_sub(number.len());
                    out.push_str(&number);
                    out.push(':');
                    out.push_str(&" ".repeat(padding));
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                out.push_str(&text);
            }
            out.push('\n');
            exported += 1;
        }
        debug!(files = exported, "rendered single file");
        Ok(out)
    }

    /// Renders the document and writes it to the configured output path.
    pub fn write(&self, line_numbers: bool) -> Result<(), SingleFileError> {
        let text = self.render(line_numbers)?;
        fs::write(&self.output_path, text).map_err(|source| SingleFileError::Io {
            path: self.output_path.clone(),
            source,
        })
    }

    /// Returns the configured output path.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
