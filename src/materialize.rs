//! Replay parsed entries against a target directory.

use crate::error::{Error, Result};
use crate::parse::ParsedEntry;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// An entry that could not be created.
#[derive(Debug)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Outcome of a replay. Failures are non-fatal; everything else was attempted.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Entries created by this run.
    pub created: Vec<PathBuf>,
    /// Entries that were already present and left untouched.
    pub existing: Vec<PathBuf>,
    pub failures: Vec<EntryFailure>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Created,
    Existing,
}

/// Create every entry under `target_root`, best effort.
///
/// The target root is created first; failing to do so aborts the replay.
/// Directories are created with their ancestors, files are created empty and
/// never truncated when something already exists at their path.
pub fn materialize(entries: &[ParsedEntry], target_root: &Path) -> Result<MaterializeReport> {
    fs::create_dir_all(target_root).map_err(|e| Error::io(target_root, e))?;

    let mut report = MaterializeReport::default();
    for entry in entries {
        let full = target_root.join(&entry.path);
        match create_entry(entry, &full) {
            Ok(Outcome::Created) => {
                debug!(path = %full.display(), dir = entry.is_dir, "created");
                report.created.push(full);
            }
            Ok(Outcome::Existing) => {
                debug!(path = %full.display(), "already exists");
                report.existing.push(full);
            }
            Err(error) => {
                warn!(path = %full.display(), %error, "failed to create entry");
                report.failures.push(EntryFailure { path: full, error });
            }
        }
    }
    Ok(report)
}

fn create_entry(entry: &ParsedEntry, full: &Path) -> io::Result<Outcome> {
    if !stays_inside(&entry.path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path escapes the target directory",
        ));
    }

    if entry.is_dir {
        if full.is_dir() {
            return Ok(Outcome::Existing);
        }
        fs::create_dir_all(full)?;
        return Ok(Outcome::Created);
    }

    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)?;
    }
    match OpenOptions::new().write(true).create_new(true).open(full) {
        Ok(_) => Ok(Outcome::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Outcome::Existing),
        Err(e) => Err(e),
    }
}

/// Only plain names and `.` may appear in an entry path.
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(path: &str, is_dir: bool) -> ParsedEntry {
        ParsedEntry {
            path: PathBuf::from(path),
            is_dir,
        }
    }

    #[test]
    fn creates_directories_and_empty_files() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("out");
        let report = materialize(
            &[entry("a", true), entry("a/b.txt", false), entry("c/d.txt", false)],
            &target,
        )
        .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.created.len(), 3);
        assert!(target.join("a").is_dir());
        assert_eq!(fs::read_to_string(target.join("a/b.txt")).unwrap(), "");
        assert!(target.join("c").is_dir(), "missing parent should be created");
    }

    #[test]
    fn existing_file_is_not_truncated() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("keep.txt"), "contents").unwrap();

        let report = materialize(&[entry("keep.txt", false)], tmp.path()).unwrap();

        assert_eq!(report.existing.len(), 1);
        assert_eq!(
            fs::read_to_string(tmp.path().join("keep.txt")).unwrap(),
            "contents"
        );
    }

    #[test]
    fn escaping_paths_are_reported_not_created() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("inner");
        let report = materialize(
            &[entry("../outside.txt", false), entry("ok.txt", false)],
            &target,
        )
        .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(!tmp.path().join("outside.txt").exists());
        assert!(target.join("ok.txt").is_file());
    }

    #[test]
    fn file_in_place_of_directory_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("clash"), "").unwrap();

        let report = materialize(
            &[entry("clash", true), entry("after.txt", false)],
            tmp.path(),
        )
        .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, tmp.path().join("clash"));
        assert!(tmp.path().join("after.txt").is_file(), "replay continues");
    }
}
