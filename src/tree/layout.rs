use super::TreeNode;
use crate::grammar::{BAR, BRANCH, LAST};

/// Render the children of `node` as tree text, one `\n`-terminated line each.
///
/// The root itself is not rendered; an empty directory yields an empty string.
pub fn render(node: &TreeNode) -> String {
    let mut out = String::new();
    render_children(node, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let Some(children) = node.children() else {
        return;
    };
    let count = children.len();
    for (i, (name, child)) in children.iter().enumerate() {
        let is_last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if is_last { LAST } else { BRANCH });
        out.push(' ');
        out.push_str(name);
        if !child.is_dir() {
            out.push('\n');
            continue;
        }
        out.push_str("/\n");

        let mut nested = String::with_capacity(prefix.len() + 6);
        nested.push_str(prefix);
        if is_last {
            nested.push_str("    ");
        } else {
            nested.push(BAR); // │
            nested.push_str("   ");
        }
        render_children(child, &nested, out);
    }
}
