//! Error types shared by the validator, materializer, and scanner.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Line-level grammar violations found by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The connector is not followed by a single separator and a valid name.
    InvalidLineFormat,
    /// Something other than filler precedes the connector.
    InvalidCharacters,
    /// The line is nested more than one level deeper than the previous entry.
    InconsistentIndentation,
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LineErrorKind::InvalidLineFormat => "Invalid line format",
            LineErrorKind::InvalidCharacters => {
                "Invalid characters between separator and tree symbol"
            }
            LineErrorKind::InconsistentIndentation => "Inconsistent indentation level",
        };
        f.write_str(msg)
    }
}

/// A single offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based position among the document's non-blank lines.
    pub line: usize,
    pub kind: LineErrorKind,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.kind)
    }
}

/// Every line error of a document, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatErrors(pub Vec<LineError>);

impl FormatErrors {
    pub fn iter(&self) -> impl Iterator<Item = &LineError> {
        self.0.iter()
    }

    /// Whether any line failed with `kind`.
    pub fn contains(&self, kind: LineErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }
}

impl fmt::Display for FormatErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("{}: Not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Input file is empty")]
    EmptyInput,

    #[error("{0}")]
    Format(FormatErrors),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path)
        } else {
            Error::Io { path, source }
        }
    }

    /// The line errors carried by a grammar failure, if any.
    pub fn format_errors(&self) -> Option<&FormatErrors> {
        match self {
            Error::Format(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
