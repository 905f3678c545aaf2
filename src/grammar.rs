//! Tree-text line grammar and the validator that enforces it.
//!
//! A document is a sequence of lines of the form `<filler><connector> <name>`,
//! where filler is made of spaces and the `│` bar, and the connector is `├──`
//! for a non-last sibling or `└──` for the last one. Blank lines and lines made
//! only of filler are allowed anywhere.

use crate::error::{Error, FormatErrors, LineError, LineErrorKind, Result};
use std::fs;
use std::path::Path;

/// Connector for a child that has a following sibling.
pub const BRANCH: &str = "\u{251c}\u{2500}\u{2500}"; // ├──
/// Connector for the last child of a sibling group.
pub const LAST: &str = "\u{2514}\u{2500}\u{2500}"; // └──
/// Continuation bar used in filler columns.
pub const BAR: char = '\u{2502}'; // │
/// Filler characters per nesting level.
pub const INDENT_UNIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Branch,
    Last,
}

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLine<'a> {
    Empty,
    /// Only spaces and bars.
    SeparatorOnly,
    Entry(EntryLine<'a>),
    /// Filler followed by something that is not a connector.
    Unrecognized,
}

/// An entry line split around its connector. Trailing whitespace is already gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLine<'a> {
    pub filler: &'a str,
    pub connector: Connector,
    /// Everything after the connector, separator included.
    pub rest: &'a str,
}

impl<'a> EntryLine<'a> {
    /// Level used for the monotonicity check: every filler character counts.
    pub fn validation_level(&self) -> usize {
        self.filler.chars().count() / INDENT_UNIT
    }

    /// Level used to rebuild the hierarchy: only literal spaces count, two per level.
    pub fn parse_level(&self) -> usize {
        self.filler.chars().filter(|c| *c == ' ').count() / 2
    }

    /// Name with surrounding whitespace removed, trailing `/` kept.
    pub fn name(&self) -> &'a str {
        self.rest.trim()
    }

    pub fn is_dir(&self) -> bool {
        self.name().ends_with('/')
    }

    /// Exactly one whitespace separator, then a name of allowed characters
    /// that is not made of slashes alone.
    pub fn is_well_formed(&self) -> bool {
        let mut chars = self.rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => {}
            _ => return false,
        }
        let name = chars.as_str();
        !name.trim_matches('/').is_empty() && name.chars().all(is_name_char)
    }
}

fn is_filler(c: char) -> bool {
    c == ' ' || c == BAR
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

/// Classify a single line of tree text.
pub fn classify(line: &str) -> TreeLine<'_> {
    let line = line.trim_end();
    if line.is_empty() {
        return TreeLine::Empty;
    }
    let body = line.trim_start_matches(is_filler);
    if body.is_empty() {
        return TreeLine::SeparatorOnly;
    }
    let filler = &line[..line.len() - body.len()];
    if let Some(rest) = body.strip_prefix(BRANCH) {
        TreeLine::Entry(EntryLine {
            filler,
            connector: Connector::Branch,
            rest,
        })
    } else if let Some(rest) = body.strip_prefix(LAST) {
        TreeLine::Entry(EntryLine {
            filler,
            connector: Connector::Last,
            rest,
        })
    } else {
        TreeLine::Unrecognized
    }
}

/// Validate a whole document, collecting one error per offending line.
///
/// Line numbers count non-blank lines only. A document without a single entry
/// line (and no other errors) is rejected as [`Error::EmptyInput`].
pub fn validate(document: &str) -> Result<()> {
    let mut errors = Vec::new();
    let mut entries = 0usize;
    let mut previous_level = 0usize;

    let non_blank = document.lines().filter(|l| !l.trim().is_empty());
    for (index, line) in non_blank.enumerate() {
        let line_number = index + 1;
        match classify(line) {
            TreeLine::Empty | TreeLine::SeparatorOnly => continue,
            TreeLine::Unrecognized => errors.push(LineError {
                line: line_number,
                kind: LineErrorKind::InvalidCharacters,
            }),
            TreeLine::Entry(entry) => {
                entries += 1;
                let level = entry.validation_level();
                if !entry.is_well_formed() {
                    errors.push(LineError {
                        line: line_number,
                        kind: LineErrorKind::InvalidLineFormat,
                    });
                } else if level > previous_level + 1 {
                    errors.push(LineError {
                        line: line_number,
                        kind: LineErrorKind::InconsistentIndentation,
                    });
                }
                previous_level = level;
            }
        }
    }

    if !errors.is_empty() {
        return Err(Error::Format(FormatErrors(errors)));
    }
    if entries == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Read and validate a tree-text file. A missing file is [`Error::NotFound`].
pub fn validate_file(path: &Path) -> Result<String> {
    let document = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    validate(&document)?;
    Ok(document)
}
