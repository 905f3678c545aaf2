mod common;

use common::create_fixture;
use foldertree::error::{Error, Result};
use foldertree::grammar::validate;
use foldertree::ignore::IgnoreMatcher;
use foldertree::structure::{render_directory, render_with, GenerateOptions};
use foldertree::tree::{render, scan, Children, TreeNode, TreeScanner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn visible() -> IgnoreMatcher {
    IgnoreMatcher::empty()
}

// --- Scanning ---

#[test]
fn test_empty_directory_renders_empty() {
    let tmp = TempDir::new().unwrap();
    let output = render_directory(tmp.path(), &GenerateOptions::default()).unwrap();
    assert_eq!(output.trim(), "");
}

#[test]
fn test_scan_keeps_listing_order() {
    let tmp = create_fixture(&["b.txt", "a/", "c/x.txt", "D.md", "e.rs"]);
    let tree = scan(tmp.path(), &visible()).unwrap();

    let listed: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    let scanned: Vec<String> = tree
        .children()
        .unwrap()
        .names()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(scanned, listed, "scanner must not re-sort entries");
}

#[test]
fn test_scan_builds_nested_nodes() {
    let tmp = create_fixture(&["src/main.rs", "src/util/mod.rs", "Cargo.toml"]);
    let tree = scan(tmp.path(), &visible()).unwrap();

    let mut paths = tree.paths();
    paths.sort();
    assert_eq!(
        paths,
        vec!["Cargo.toml", "src/", "src/main.rs", "src/util/", "src/util/mod.rs"]
    );
    let src = tree.children().unwrap().get("src").unwrap();
    assert!(src.is_dir());
    assert_eq!(src.children().unwrap().get("main.rs"), Some(&TreeNode::File));
}

#[test]
fn test_scan_missing_root() {
    let tmp = TempDir::new().unwrap();
    let err = render_directory(&tmp.path().join("gone"), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
#[cfg(unix)]
fn test_symlink_is_a_leaf() {
    let tmp = create_fixture(&["real/inner.txt"]);
    std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

    let tree = scan(tmp.path(), &visible()).unwrap();
    let link = tree.children().unwrap().get("link").unwrap();
    assert_eq!(link, &TreeNode::File, "symlinks must not be followed");

    let output = render(&tree);
    assert_eq!(output.matches("inner.txt").count(), 1);
    assert!(!output.contains("link/"));
}

// --- Rendering ---

#[test]
fn test_last_sibling_uses_last_connector() {
    let tmp = create_fixture(&["one.txt", "two.txt", "three.txt"]);
    let output = render_directory(tmp.path(), &GenerateOptions::default()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    for line in &lines[..2] {
        assert!(line.starts_with('\u{251c}'), "non-last should use branch: {line:?}");
    }
    assert!(lines[2].starts_with('\u{2514}'), "last should use corner: {:?}", lines[2]);
}

#[test]
fn test_generated_text_passes_validation() {
    let tmp = create_fixture(&[
        "a/b/c/d/deep.txt",
        "a/b/sibling.txt",
        "a/top.txt",
        "z/",
        "readme.md",
    ]);
    let output = render_directory(tmp.path(), &GenerateOptions::default()).unwrap();
    validate(&output).unwrap_or_else(|e| panic!("{e}\n{output}"));
}

#[test]
fn test_output_file_inside_source_is_not_listed() {
    let tmp = create_fixture(&["folder1/file1.txt"]);
    let output = tmp.path().join("output-structure.txt");
    let text = foldertree::structure::generate_text(tmp.path(), &output, &GenerateOptions::default())
        .unwrap();
    assert!(!text.contains("output-structure.txt"));
    assert!(output.is_file());
}

// --- Scanner seam ---

struct FixedScanner;

impl TreeScanner for FixedScanner {
    fn scan(&self, _root: &Path, matcher: &IgnoreMatcher) -> Result<TreeNode> {
        let mut children = Children::new();
        for name in ["zz.txt", "debug.log", "aa.txt"] {
            if !matcher.ignores(name) {
                children.insert(name, TreeNode::File);
            }
        }
        Ok(TreeNode::Directory(children))
    }
}

#[test]
fn test_render_with_custom_scanner() {
    let output = render_with(&FixedScanner, Path::new("unused"), &IgnoreMatcher::new()).unwrap();
    assert_eq!(
        output,
        "\u{251c}\u{2500}\u{2500} zz.txt\n\u{2514}\u{2500}\u{2500} aa.txt\n"
    );
}
