#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path(), paths);
    tmp
}

/// Same as `create_fixture`, into an existing directory.
pub fn populate(root: &Path, paths: &[&str]) {
    for p in paths {
        let full = root.join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
}

/// Write a tree-text document next to (not inside) the directories under test.
pub fn write_input(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("structure.txt");
    fs::write(&path, contents).unwrap();
    path
}

/// Every path below `root`, sorted, directories suffixed with '/'.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if e.file_type().is_dir() {
                format!("{rel}/")
            } else {
                rel
            }
        })
        .collect();
    out.sort();
    out
}
