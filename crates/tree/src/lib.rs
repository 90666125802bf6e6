#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tree` materialises a rule-filtered directory tree into a mutable node
//! arena and keeps that arena path-consistent under rename and prune
//! operations. Traversal is recursive descent with lexicographically sorted
//! siblings, so the resulting node order is deterministic across platforms.
//!
//! # Design
//!
//! - [`TreeBuilder`] walks the filesystem, filtering each entry's leaf name
//!   through an optional [`rules::CompositeRule`], and produces a [`Tree`].
//! - [`Tree`] owns a flat `Vec<Node>` arena. Parent/child relationships are
//!   integer indices into that arena, never references, which keeps the
//!   structure an ordinary owned value under mutation.
//! - Mutators ([`Tree::rename_root`], [`Tree::rename_leaves`],
//!   [`Tree::exclude_leaf`]) re-derive paths and connector symbols after
//!   structural changes instead of trying to patch them incrementally.
//!
//! # Invariants
//!
//! - Index 0 is always the root; it is the only node with no parent (its
//!   serialised parent is `-1`).
//! - Arena order puts every parent before its children, so one forward pass
//!   suffices for path propagation.
//! - `exclude_leaf` never removes directories or the root, and remaps every
//!   surviving index so `children` lists only name live nodes.
//!
//! # Errors
//!
//! Operations report [`TreeError`]: filesystem failures carry the offending
//! path, malformed name patterns carry the pattern, and an unknown rename
//! mode string is a configuration error.
//!
//! # Examples
//!
//! ```
//! use tree::TreeBuilder;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::write(temp.path().join("keep.rs"), b"fn main() {}")?;
//! fs::write(temp.path().join("drop.txt"), b"scratch")?;
//!
//! let mut tree = TreeBuilder::new(temp.path()).build()?;
//! tree.exclude_leaf(&["*.txt".into()])?;
//!
//! assert!(tree.nodes().iter().any(|node| node.name == "keep.rs"));
//! assert!(tree.nodes().iter().all(|node| node.name != "drop.txt"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod node;
mod render;
mod rename;
mod tree;
mod walk;

pub use error::TreeError;
pub use node::{ContentKind, Node};
pub use rename::{RenameMode, apply_asterisk_rule};
pub use tree::Tree;
pub use walk::TreeBuilder;
