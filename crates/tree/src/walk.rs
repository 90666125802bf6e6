use std::fs;
use std::path::{Path, PathBuf};

use rules::{CompositeRule, Rule};
use tracing::{debug, trace};

use crate::tree::join_path;
use crate::{Node, Tree, TreeError};

/// Configures a rule-filtered traversal rooted at a specific path.
#[derive(Debug)]
pub struct TreeBuilder {
    root: PathBuf,
    rule: Option<CompositeRule>,
}

impl TreeBuilder {
    /// Creates a builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            rule: None,
        }
    }

    /// Filters directory entries through a composite rule during the walk.
    ///
    /// The rule sees each entry's leaf name. Entries failing the rule are
    /// neither recorded nor descended into.
    #[must_use]
    pub fn rule(mut self, rule: CompositeRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Walks the filesystem and materialises the node arena.
    ///
    /// The root is recorded first at index 0. When the root is not a
    /// directory the arena holds that single node. Directory entries are
    /// sorted lexicographically before being visited, so sibling order is
    /// stable regardless of the filesystem's iteration order.
    pub fn build(self) -> Result<Tree, TreeError> {
        let root_path = self.root.display().to_string();
        let is_dir = self.root.is_dir();
        debug!(root = %root_path, is_dir, "materialising tree");

        let mut nodes = vec![Node {
            symbol: String::new(),
            name: root_path.clone(),
            path: root_path,
            parent: None,
            children: Vec::new(),
            is_dir,
            content: None,
        }];

        if is_dir {
            walk_dir(&mut nodes, &self.root, 0, "", self.rule.as_ref())?;
        }
        debug!(nodes = nodes.len(), "tree materialised");
        Ok(Tree::from_nodes(nodes))
    }
}

fn walk_dir(
    nodes: &mut Vec<Node>,
    dir: &Path,
    parent: usize,
    prefix: &str,
    rule: Option<&CompositeRule>,
) -> Result<(), TreeError> {
    let listing = fs::read_dir(dir).map_err(|source| TreeError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|source| TreeError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if rule.is_none_or(|rule| rule.matches(&name)) {
            entries.push(name);
        } else {
            trace!(entry = %name, "filtered out");
        }
    }
    entries.sort();

    let count = entries.len();
    for (position, name) in entries.into_iter().enumerate() {
        let last = position + 1 == count;
        let full_path = dir.join(&name);
        let is_dir = full_path.is_dir();
        let connector = if last { "└── " } else { "├── " };

        let index = nodes.len();
        let path = join_path(&nodes[parent].path, &name);
        nodes.push(Node {
            symbol: format!("{prefix}{connector}"),
            name,
            path,
            parent: Some(parent),
            children: Vec::new(),
            is_dir,
            content: None,
        });
        nodes[parent].children.push(index);

        if is_dir {
            let continuation = if last { "    " } else { "│   " };
            let next_prefix = format!("{prefix}{continuation}");
            walk_dir(nodes, &full_path, index, &next_prefix, rule)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::HiddenFileRule;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("sub")).expect("mkdir");
        fs::write(temp.path().join("b.txt"), b"b").expect("write");
        fs::write(temp.path().join("a.txt"), b"a").expect("write");
        fs::write(temp.path().join(".hidden"), b"h").expect("write");
        fs::write(temp.path().join("sub/nested.rs"), b"n").expect("write");
        temp
    }

    #[test]
    fn root_is_index_zero_with_no_parent() {
        let temp = fixture();
        let tree = TreeBuilder::new(temp.path()).build().expect("build");
        let root = &tree.nodes()[0];
        assert!(root.is_root());
        assert!(root.is_dir);
        assert!(root.symbol.is_empty());
    }

    #[test]
    fn file_root_yields_a_single_node() {
        let temp = fixture();
        let file = temp.path().join("a.txt");
        let tree = TreeBuilder::new(&file).build().expect("build");
        assert_eq!(tree.len(), 1);
        assert!(!tree.nodes()[0].is_dir);
    }

    #[test]
    fn siblings_are_sorted_lexicographically() {
        let temp = fixture();
        let tree = TreeBuilder::new(temp.path()).build().expect("build");
        let names: Vec<&str> = tree.nodes()[0]
            .children
            .iter()
            .map(|&child| tree.nodes()[child].name.as_str())
            .collect();
        assert_eq!(names, [".hidden", "a.txt", "b.txt", "sub"]);
    }

    #[test]
    fn filtered_entries_are_not_recorded() {
        let temp = fixture();
        let mut rule = CompositeRule::default();
        rule.append(HiddenFileRule);
        let tree = TreeBuilder::new(temp.path())
            .rule(rule)
            .build()
            .expect("build");
        assert!(tree.nodes().iter().all(|node| node.name != ".hidden"));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn children_reference_their_parent() {
        let temp = fixture();
        let tree = TreeBuilder::new(temp.path()).build().expect("build");
        for (index, node) in tree.nodes().iter().enumerate().skip(1) {
            let parent = node.parent.expect("non-root has a parent");
            assert!(tree.nodes()[parent].children.contains(&index));
            assert!(node.path.starts_with(&tree.nodes()[parent].path));
        }
    }

    #[test]
    fn connectors_distinguish_last_siblings() {
        let temp = fixture();
        let tree = TreeBuilder::new(temp.path()).build().expect("build");
        let children = &tree.nodes()[0].children;
        let last = *children.last().expect("children");
        assert!(tree.nodes()[last].symbol.ends_with("└── "));
        for &child in &children[..children.len() - 1] {
            assert!(tree.nodes()[child].symbol.ends_with("├── "));
        }
    }

    #[test]
    fn missing_root_is_recorded_alone() {
        // A missing root is not a directory, so the walk records it alone
        // rather than failing; callers see a one-node tree.
        let tree = TreeBuilder::new("/definitely/not/here")
            .build()
            .expect("build");
        assert_eq!(tree.len(), 1);
        assert!(!tree.nodes()[0].is_dir);
    }
}
