//! Public create/generate operations wiring the pipeline stages together.

use crate::error::{Error, Result};
use crate::grammar;
use crate::ignore::IgnoreMatcher;
use crate::materialize::{materialize, MaterializeReport};
use crate::parse::parse;
use crate::tree::{render, TreeScanner, WalkdirScanner};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for turning a directory into tree text.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Skip the built-in ignore table (VCS, dependency, build, secret paths).
    pub include_hidden: bool,
    /// Gitignore files appended after the defaults, in order. Missing files are skipped.
    pub ignore_files: Vec<PathBuf>,
    /// Single patterns appended after the files.
    pub extra_patterns: Vec<String>,
}

impl GenerateOptions {
    /// Build a fresh matcher for one generation run.
    pub fn build_matcher(&self) -> IgnoreMatcher {
        let mut matcher = IgnoreMatcher::with_defaults(!self.include_hidden);
        for path in &self.ignore_files {
            matcher.load_rules(path);
        }
        for pattern in &self.extra_patterns {
            matcher.add_pattern(pattern);
        }
        matcher
    }
}

/// Validate a tree-text file without touching the filesystem.
pub fn validate_file(input: &Path) -> Result<()> {
    grammar::validate_file(input).map(|_| ())
}

/// Read, validate, and replay a tree-text file under `target`.
pub fn create_from_text(input: &Path, target: &Path) -> Result<MaterializeReport> {
    let document = fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    create_from_str(&document, target)
}

/// Validate and replay an in-memory document. Nothing is created when
/// validation fails.
pub fn create_from_str(document: &str, target: &Path) -> Result<MaterializeReport> {
    grammar::validate(document)?;
    let entries = parse(document);
    info!(entries = entries.len(), target = %target.display(), "creating structure");
    materialize(&entries, target)
}

/// Scan `source` with the walkdir scanner and render it.
pub fn render_directory(source: &Path, options: &GenerateOptions) -> Result<String> {
    render_with(&WalkdirScanner, source, &options.build_matcher())
}

/// Scan with any [`TreeScanner`] and render the result.
pub fn render_with<S: TreeScanner + ?Sized>(
    scanner: &S,
    source: &Path,
    matcher: &IgnoreMatcher,
) -> Result<String> {
    let tree = scanner.scan(source, matcher)?;
    Ok(render(&tree))
}

/// Render `source` and write the text to `output`. Returns the text written.
pub fn generate_text(source: &Path, output: &Path, options: &GenerateOptions) -> Result<String> {
    let text = render_directory(source, options)?;
    fs::write(output, &text).map_err(|e| Error::io(output, e))?;
    info!(source = %source.display(), output = %output.display(), "structure written");
    Ok(text)
}
