//! In-memory directory tree, scanning, and tree-text rendering.

mod layout;
pub(crate) mod walk;

use crate::error::Result;
use crate::ignore::IgnoreMatcher;
use std::path::Path;

pub use layout::render;
pub use walk::scan;

/// A scanned filesystem node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory(Children),
    File,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Children of a directory; `None` for files.
    pub fn children(&self) -> Option<&Children> {
        match self {
            TreeNode::Directory(children) => Some(children),
            TreeNode::File => None,
        }
    }

    /// Relative paths of every node below this one, depth first, directories
    /// suffixed with `/`.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(self, "", &mut out);
        out
    }
}

fn collect_paths(node: &TreeNode, prefix: &str, out: &mut Vec<String>) {
    let Some(children) = node.children() else {
        return;
    };
    for (name, child) in children.iter() {
        let path = format!("{prefix}{name}");
        if child.is_dir() {
            out.push(format!("{path}/"));
            collect_paths(child, &format!("{path}/"), out);
        } else {
            out.push(path);
        }
    }
}

/// Directory children keyed by name, kept in insertion order.
///
/// Rendering relies on this order to decide which sibling is last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    entries: Vec<(String, TreeNode)>,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the end, or replace in place if `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, node: TreeNode) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = node,
            None => self.entries.push((name, node)),
        }
    }

    /// Append without checking for an existing name. Directory listings
    /// never repeat a name, so the scanner takes this path.
    pub(crate) fn push(&mut self, name: String, node: TreeNode) {
        self.entries.push((name, node));
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &TreeNode)> {
        self.entries.iter().map(|(n, node)| (n.as_str(), node))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Abstraction over tree construction so it can be swapped or mocked.
pub trait TreeScanner {
    fn scan(&self, root: &Path, matcher: &IgnoreMatcher) -> Result<TreeNode>;
}

/// Default `TreeScanner` that delegates to the walkdir-based implementation.
pub struct WalkdirScanner;

impl TreeScanner for WalkdirScanner {
    fn scan(&self, root: &Path, matcher: &IgnoreMatcher) -> Result<TreeNode> {
        scan(root, matcher)
    }
}
