use super::{Children, TreeNode};
use crate::error::{Error, Result};
use crate::ignore::IgnoreMatcher;
use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// A directory whose children are still being collected.
struct OpenDir {
    name: String,
    children: Children,
    /// Set when at least one child was dropped by the ignore rules.
    filtered: bool,
}

impl OpenDir {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Children::new(),
            filtered: false,
        }
    }
}

/// Scan `root` into a nested tree, in directory listing order.
///
/// Ignored entries are dropped together with their subtrees, and a directory
/// left empty only because its contents were ignored is dropped as well.
/// Directories that are empty on disk are kept. Symlinks are leaves.
pub fn scan(root: &Path, matcher: &IgnoreMatcher) -> Result<TreeNode> {
    let meta = fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    // stack[d] is the open directory at depth d; stack[0] is the root.
    let mut stack = vec![OpenDir::new(String::new())];
    let mut walker = WalkDir::new(root).follow_links(false).into_iter();

    while let Some(entry_result) = walker.next() {
        let entry = entry_result.map_err(|e| walk_error(root, e))?;
        let depth = entry.depth();
        if depth == 0 {
            continue;
        }
        while stack.len() > depth {
            close_dir(&mut stack);
        }

        let is_dir = entry.file_type().is_dir();
        // Match relative to the scan root so anchored patterns like "src/gen" work
        let rel = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
        if matcher.matches_path(rel, is_dir) {
            trace!(path = %rel.display(), "ignored");
            if let Some(parent) = stack.last_mut() {
                parent.filtered = true;
            }
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_dir {
            stack.push(OpenDir::new(name));
        } else if let Some(parent) = stack.last_mut() {
            parent.children.push(name, TreeNode::File);
        }
    }

    while stack.len() > 1 {
        close_dir(&mut stack);
    }
    let children = stack.pop().map(|top| top.children).unwrap_or_default();
    Ok(TreeNode::Directory(children))
}

/// Pop the innermost open directory and attach it to its parent, unless
/// filtering emptied it.
fn close_dir(stack: &mut Vec<OpenDir>) {
    let Some(dir) = stack.pop() else {
        return;
    };
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if dir.children.is_empty() && dir.filtered {
        parent.filtered = true;
    } else {
        parent
            .children
            .push(dir.name, TreeNode::Directory(dir.children));
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    match err.into_io_error() {
        Some(source) => Error::io(path, source),
        None => Error::Io {
            path,
            source: io::Error::other("filesystem loop detected"),
        },
    }
}
