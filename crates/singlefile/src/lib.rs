#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `singlefile` flattens a classified directory tree into one annotated text
//! document and recovers the per-file sections from such a document. Every
//! text-classified file contributes a header (instantiated from a template
//! that names the file) followed by its contents; binary files and
//! directories are skipped.
//!
//! # Design
//!
//! - [`SingleFile`] wraps a [`tree::Tree`], classifying its contents on
//!   construction, and renders or writes the combined document. Line numbers
//!   are optional and padded to a fixed column width.
//! - [`parse`] and [`parse_with_template`] invert the export: the header
//!   template drives section recognition, and line-number prefixes are
//!   stripped back out of the content.
//!
//! # Invariants
//!
//! - The header template always contains the `{file_name}` placeholder; a
//!   template without it is rejected at configuration time.
//! - Rendering visits nodes in arena order, so sections appear in the same
//!   deterministic order as the underlying walk.
//!
//! # Errors
//!
//! Operations report [`SingleFileError`]: a missing placeholder is a
//! configuration error, tree classification failures pass through, and file
//! reads or the final write carry the offending path.
//!
//! # Examples
//!
//! ```
//! use singlefile::{SingleFile, parse};
//! use tree::TreeBuilder;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::write(temp.path().join("note.txt"), "hello\n")?;
//!
//! let tree = TreeBuilder::new(temp.path()).build()?;
//! let exported = SingleFile::new(tree)?.render(false)?;
//!
//! let files = parse(&exported);
//! assert_eq!(files.len(), 1);
//! assert_eq!(files[0].content, "hello\n");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod export;
mod parse;

pub use error::SingleFileError;
pub use export::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE, PLACEHOLDER, SingleFile};
pub use parse::{ExportedFile, parse, parse_with_template};
