//! Rebuild a path hierarchy from validated tree text.

use crate::grammar::{classify, TreeLine};
use std::path::PathBuf;

/// One file or directory described by the document, relative to the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
struct PathFrame {
    name: String,
    level: usize,
}

/// Stack of open ancestors, strictly increasing in level from bottom to top.
#[derive(Debug, Default)]
struct PathStack {
    frames: Vec<PathFrame>,
}

impl PathStack {
    /// Pop every frame at or below `level`, push `name`, and return the joined path.
    fn enter(&mut self, name: &str, level: usize) -> PathBuf {
        while self.frames.last().is_some_and(|f| f.level >= level) {
            self.frames.pop();
        }
        self.frames.push(PathFrame {
            name: name.to_string(),
            level,
        });
        self.frames.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Parse a document into entries in document order.
///
/// Blank, separator-only, and unrecognized lines are skipped; callers are
/// expected to run [`crate::grammar::validate`] first.
pub fn parse(document: &str) -> Vec<ParsedEntry> {
    let mut stack = PathStack::default();
    let mut entries = Vec::new();

    for line in document.lines() {
        let TreeLine::Entry(entry) = classify(line) else {
            continue;
        };
        let raw = entry.name();
        let name = raw.trim_end_matches('/');
        if name.is_empty() {
            continue;
        }
        let path = stack.enter(name, entry.parse_level());
        entries.push(ParsedEntry {
            path,
            is_dir: entry.is_dir(),
        });
    }

    entries
}
