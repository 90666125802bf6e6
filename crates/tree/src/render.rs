//! Connector-symbol maintenance and plain-text rendering.

use crate::Node;

/// Recomputes every node's connector symbol from the current structure.
///
/// Needed after structural mutation: a removed sibling can turn `├── ` into
/// `└── ` and shorten continuation prefixes further down.
pub(crate) fn refresh_symbols(nodes: &mut [Node]) {
    if nodes.is_empty() {
        return;
    }
    nodes[0].symbol.clear();
    refresh_children(nodes, 0, "");
}

fn refresh_children(nodes: &mut [Node], index: usize, prefix: &str) {
    let children = nodes[index].children.clone();
    let count = children.len();
    for (position, child) in children.into_iter().enumerate() {
        let last = position + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        nodes[child].symbol = format!("{prefix}{connector}");
        if nodes[child].is_dir {
            let continuation = if last { "    " } else { "│   " };
            refresh_children(nodes, child, &format!("{prefix}{continuation}"));
        }
    }
}

/// Renders the arena as a connector-prefixed listing, one node per line.
pub(crate) fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&node.symbol);
        out.push_str(&node.name);
        out.push('\n');
    }
    out
}
