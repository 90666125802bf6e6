use std::fs::File;
use std::io::Read;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::render;
use crate::{ContentKind, Node, RenameMode, TreeError, apply_asterisk_rule};

/// Bytes inspected per file when classifying contents.
const CLASSIFY_PREFIX_LEN: u64 = 8192;

/// A materialised directory tree held as a node arena.
///
/// Nodes reference each other by index; index 0 is always the root. Mutators
/// keep the arena's invariants intact: `children` lists always point at live
/// nodes, and after any rename pass every non-root node's `path` equals its
/// parent's path joined with its own name.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Returns the nodes in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the connector-prefixed listing, one node per line.
    #[must_use]
    pub fn render(&self) -> String {
        render::render(&self.nodes)
    }

    /// Replaces the root's name and propagates the change to every path.
    pub fn rename_root(&mut self, name: &str) {
        self.nodes[0].name = name.to_owned();
        self.nodes[0].path = name.to_owned();
        self.propagate_paths();
    }

    /// Low-level rename primitive for a single node's name.
    ///
    /// [`RenameMode::Add`] expands `rename` against the current name via the
    /// asterisk convention; [`RenameMode::Replace`] overwrites it. Paths are
    /// not touched; callers run [`propagate_paths`](Self::propagate_paths)
    /// after a batch of renames.
    pub fn update_node(
        &mut self,
        index: usize,
        rename: &str,
        mode: RenameMode,
    ) -> Result<(), TreeError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;
        node.name = match mode {
            RenameMode::Add => apply_asterisk_rule(&node.name, rename),
            RenameMode::Replace => rename.to_owned(),
        };
        Ok(())
    }

    /// Renames every non-root node selected by the include/exclude lists.
    ///
    /// Patterns are fnmatch-style globs matched against node paths; a node
    /// matching any exclude pattern is skipped outright. Non-matching
    /// directories are still renamed when `rename_dirs` is set, so a prefix
    /// applied to files can follow their folders. Ends with a path
    /// propagation pass.
    pub fn rename_leaves(
        &mut self,
        rename: &str,
        include: &[String],
        exclude: &[String],
        rename_dirs: bool,
    ) -> Result<(), TreeError> {
        if self.nodes.len() <= 1 {
            return Ok(());
        }
        let include = compile_patterns(include)?;
        let exclude = compile_patterns(exclude)?;
        debug!(rename, rename_dirs, "renaming leaves");

        for index in 1..self.nodes.len() {
            let path = self.nodes[index].path.clone();
            if exclude.is_match(&path) {
                continue;
            }
            if include.is_match(&path) || (rename_dirs && self.nodes[index].is_dir) {
                self.update_node(index, rename, RenameMode::Add)?;
            }
        }
        self.propagate_paths();
        Ok(())
    }

    /// Recomputes every non-root node's path from its parent chain.
    ///
    /// Arena order puts parents before children, so a single forward pass
    /// sees each parent's refreshed path before its children need it.
    pub fn propagate_paths(&mut self) {
        for index in 1..self.nodes.len() {
            if let Some(parent) = self.nodes[index].parent {
                self.nodes[index].path = join_path(&self.nodes[parent].path, &self.nodes[index].name);
            }
        }
    }

    /// Removes non-directory nodes whose name matches any of the patterns.
    ///
    /// Directories are retained even when their basename matches: pruning a
    /// directory without pruning its recorded children would corrupt the
    /// parent/child indices. Surviving nodes are re-indexed, every
    /// parent/child link is remapped, and connector symbols are refreshed.
    /// Returns the number of removed nodes; running the same exclusion twice
    /// removes nothing the second time.
    pub fn exclude_leaf(&mut self, patterns: &[String]) -> Result<usize, TreeError> {
        let matcher = compile_patterns(patterns)?;

        let mut remap = vec![None; self.nodes.len()];
        let mut kept = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            let removed = !node.is_root() && !node.is_dir && matcher.is_match(&node.name);
            if !removed {
                remap[index] = Some(kept.len());
                kept.push(node.clone());
            }
        }

        let removed = self.nodes.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }
        debug!(removed, "excluded leaves");

        for node in &mut kept {
            // Parents are directories or the root, which are always kept.
            node.parent = node.parent.and_then(|parent| remap[parent]);
            node.children = node
                .children
                .iter()
                .filter_map(|&child| remap[child])
                .collect();
        }
        self.nodes = kept;
        render::refresh_symbols(&mut self.nodes);
        Ok(removed)
    }

    /// Classifies every file node's contents as text or binary.
    ///
    /// Reads a bounded prefix of each file; a NUL byte anywhere in the
    /// prefix marks the file as binary. Directory nodes stay unclassified.
    pub fn classify_contents(&mut self) -> Result<(), TreeError> {
        for node in &mut self.nodes {
            if node.is_dir {
                continue;
            }
            let mut prefix = Vec::new();
            File::open(&node.path)
                .and_then(|file| file.take(CLASSIFY_PREFIX_LEN).read_to_end(&mut prefix))
                .map_err(|source| TreeError::Io {
                    path: node.path.clone().into(),
                    source,
                })?;
            node.content = Some(if prefix.contains(&0) {
                ContentKind::Binary
            } else {
                ContentKind::Text
            });
        }
        Ok(())
    }
}

/// Joins a parent path and a leaf name with a single separator.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    format!("{parent}/{name}")
}

fn compile_patterns(patterns: &[String]) -> Result<GlobSet, TreeError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|source| TreeError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TreeError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}
