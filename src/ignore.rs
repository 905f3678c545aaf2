//! Gitignore-style filtering for directory scans.
//!
//! Rules are evaluated in order and the last matching rule decides, so
//! patterns loaded from a file override the built-in table and a `!` rule can
//! re-include something an earlier rule excluded. A path under an excluded
//! directory stays excluded.

use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Built-in patterns applied unless hidden/system paths are requested.
pub const DEFAULT_PATTERNS: &[&str] = &[
    // version control
    ".git",
    ".svn/",
    ".hg/",
    // dependencies
    "node_modules/",
    "bower_components/",
    "jspm_packages/",
    ".venv/",
    "__pycache__/",
    // editors
    ".idea/",
    ".vscode/",
    "*.swp",
    "*.swo",
    // build output and caches
    "dist/",
    "build/",
    "target/",
    ".cache/",
    ".next/",
    // OS artifacts
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    // logs
    "logs/",
    "*.log",
    // coverage
    "coverage/",
    ".nyc_output/",
    // environment and secrets
    ".env",
    ".env.*",
    "*.pem",
];

/// One compiled gitignore line.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    source: String,
    glob: GlobMatcher,
    negated: bool,
    dir_only: bool,
    anchored: bool,
    /// For `dir/**` rules, matches `dir` itself so an emptied directory goes too.
    container: Option<GlobMatcher>,
}

impl IgnoreRule {
    /// Compile a single line. Blank lines and comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, globset::Error> {
        let trimmed = line.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (dir_only, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        // A slash anywhere but the end ties the pattern to the scan root.
        let anchored = body.contains('/');
        let body = body.strip_prefix('/').unwrap_or(body);
        if body.is_empty() {
            return Ok(None);
        }

        let glob = compile(body)?;
        let container = match body.strip_suffix("/**") {
            Some(dir) if !dir.is_empty() => Some(compile(dir)?),
            _ => None,
        };

        Ok(Some(Self {
            source: trimmed.to_string(),
            glob,
            negated,
            dir_only,
            anchored,
            container,
        }))
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// `rel` is a `/`-separated path relative to the scan root.
    fn matches(&self, rel: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            self.glob.is_match(rel)
                || (is_dir && self.container.as_ref().is_some_and(|c| c.is_match(rel)))
        } else {
            let base = rel.rsplit('/').next().unwrap_or(rel);
            self.glob.is_match(base)
        }
    }
}

fn compile(glob: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?
        .compile_matcher())
}

/// Ordered rule set answering "is this relative path ignored?".
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    /// Matcher loaded with [`DEFAULT_PATTERNS`].
    pub fn new() -> Self {
        Self::with_defaults(true)
    }

    /// Matcher with no rules at all.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_defaults(include_defaults: bool) -> Self {
        let mut matcher = Self::empty();
        if include_defaults {
            for pattern in DEFAULT_PATTERNS {
                matcher.add_pattern(pattern);
            }
        }
        matcher
    }

    /// Append one pattern. Invalid globs are skipped with a warning.
    /// Returns whether a rule was added.
    pub fn add_pattern(&mut self, pattern: &str) -> bool {
        match IgnoreRule::parse(pattern) {
            Ok(Some(rule)) => {
                self.rules.push(rule);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(pattern, error = %e, "invalid ignore pattern, skipped");
                false
            }
        }
    }

    /// Append the patterns of a gitignore file after the current rules.
    ///
    /// A missing or unreadable file leaves the matcher unchanged. Returns the
    /// number of rules added.
    pub fn load_rules(&mut self, path: &Path) -> usize {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignore file not loaded");
                return 0;
            }
        };
        let added = contents
            .lines()
            .filter(|line| self.add_pattern(line))
            .count();
        debug!(path = %path.display(), added, "loaded ignore rules");
        added
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `rel` itself is matched, without looking at its ancestors.
    ///
    /// Scans use this because an ignored directory is never entered.
    pub fn matches_path(&self, rel: &Path, is_dir: bool) -> bool {
        let joined = segments(rel).join("/");
        !joined.is_empty() && self.decide(&joined, is_dir)
    }

    /// Whether `rel` or any of its ancestor directories is ignored.
    pub fn is_ignored(&self, rel: &Path, is_dir: bool) -> bool {
        let segments = segments(rel);
        let mut prefix = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);
            let last = i + 1 == segments.len();
            if self.decide(&prefix, !last || is_dir) {
                return true;
            }
        }
        false
    }

    /// String form of [`is_ignored`](Self::is_ignored); a trailing `/` marks a directory.
    pub fn ignores(&self, rel: &str) -> bool {
        let is_dir = rel.ends_with('/');
        self.is_ignored(Path::new(rel.trim_end_matches('/')), is_dir)
    }

    fn decide(&self, rel: &str, is_dir: bool) -> bool {
        let mut ignored = false;
        for rule in &self.rules {
            if rule.matches(rel, is_dir) {
                ignored = !rule.negated;
            }
        }
        ignored
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(rel: &Path) -> Vec<String> {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
