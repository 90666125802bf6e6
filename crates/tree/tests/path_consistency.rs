//! End-to-end checks that rename and prune operations keep the arena's
//! parent/child/path invariants intact.

use std::fs;

use rules::{CompositeRule, GlobRule, HiddenFileRule};
use tree::{RenameMode, TreeBuilder};

fn project_fixture() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("src/util")).expect("mkdir");
    fs::create_dir(temp.path().join("docs")).expect("mkdir");
    fs::write(temp.path().join("README.md"), b"# readme\n").expect("write");
    fs::write(temp.path().join(".secret"), b"hidden\n").expect("write");
    fs::write(temp.path().join("src/main.rs"), b"fn main() {}\n").expect("write");
    fs::write(temp.path().join("src/util/helpers.rs"), b"pub fn help() {}\n").expect("write");
    fs::write(temp.path().join("docs/guide.txt"), b"guide\n").expect("write");
    temp
}

#[test]
fn rename_root_then_prefix_leaves() {
    let temp = project_fixture();
    let mut tree = TreeBuilder::new(temp.path()).build().expect("build");
    let originals: Vec<String> = tree.nodes().iter().map(|node| node.name.clone()).collect();

    tree.rename_root("exported");
    tree.rename_leaves("prefix_*", &["*".into()], &[], true)
        .expect("rename");

    for (index, node) in tree.nodes().iter().enumerate().skip(1) {
        assert_eq!(node.name, format!("prefix_{}", originals[index]));
        let parent = node.parent.expect("non-root node");
        let parent_path = &tree.nodes()[parent].path;
        assert_eq!(node.path, format!("{parent_path}/{}", node.name));
    }
    assert_eq!(tree.nodes()[0].path, "exported");
}

#[test]
fn filtered_walk_then_exclusion() {
    let temp = project_fixture();
    let mut rule = CompositeRule::default();
    rule.append(HiddenFileRule);
    let mut tree = TreeBuilder::new(temp.path())
        .rule(rule)
        .build()
        .expect("build");

    assert!(tree.nodes().iter().all(|node| node.name != ".secret"));

    let removed = tree.exclude_leaf(&["*.md".into(), "*.txt".into()]).expect("exclude");
    assert_eq!(removed, 2);

    // Directories survive and the structure stays navigable.
    for name in ["src", "util", "docs"] {
        assert!(tree.nodes().iter().any(|node| node.name == name));
    }
    for (index, node) in tree.nodes().iter().enumerate() {
        for &child in &node.children {
            assert_eq!(tree.nodes()[child].parent, Some(index));
        }
    }
}

#[test]
fn glob_filtered_walk_drops_whole_subtrees() {
    let temp = project_fixture();
    // Keep everything except the docs directory; its contents must not be
    // visited at all.
    let glob = GlobRule::new(None, Some(vec!["docs".into()])).expect("glob");
    let mut rule = CompositeRule::default();
    rule.append(glob);

    let tree = TreeBuilder::new(temp.path()).rule(rule).build().expect("build");
    assert!(tree.nodes().iter().all(|node| node.name != "docs"));
    assert!(tree.nodes().iter().all(|node| node.name != "guide.txt"));
}

#[test]
fn serialized_arena_matches_the_external_shape() {
    let temp = project_fixture();
    let tree = TreeBuilder::new(temp.path()).build().expect("build");

    let json = serde_json::to_value(tree.nodes()).expect("serialises");
    let nodes = json.as_array().expect("array");
    assert_eq!(nodes[0]["parent"], -1);
    for node in &nodes[1..] {
        assert!(node["parent"].as_i64().expect("parent index") >= 0);
        assert!(node["symbol"].as_str().expect("symbol").ends_with("── "));
    }
}

#[test]
fn replace_mode_renames_a_single_node() {
    let temp = project_fixture();
    let mut tree = TreeBuilder::new(temp.path()).build().expect("build");

    tree.update_node(1, "renamed", RenameMode::Replace).expect("update");
    tree.propagate_paths();

    let node = &tree.nodes()[1];
    assert_eq!(node.name, "renamed");
    assert!(node.path.ends_with("/renamed"));
}
