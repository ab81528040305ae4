// src/inspect.rs

//! Local installation state
//!
//! Compares each manifest entry with what is on disk. Inspection is read-only
//! and never fails: an unreadable file is treated as stale so it gets
//! downloaded again instead of aborting the pass.
//!
//! Manifest paths are trusted. `..` components are passed through to the
//! filesystem unchanged, so a manifest can name files outside the install root.

use crate::checksum::{ChecksumType, hashes_match};
use crate::manifest::ManifestEntry;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// State of an installed file relative to its manifest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

impl FileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FileStatus::UpToDate => "up to date",
            FileStatus::Stale => "stale",
            FileStatus::Missing => "missing",
        }
    }

    pub fn needs_update(&self) -> bool {
        !matches!(self, FileStatus::UpToDate)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a `/`-separated manifest path under `install_root`
///
/// Empty and `.` components are dropped, so a leading `/` cannot replace the
/// root.
pub fn resolve_path(install_root: &Path, relative_path: &str) -> PathBuf {
    let mut path = install_root.to_path_buf();
    for component in relative_path.split('/') {
        match component {
            "" | "." => continue,
            other => path.push(other),
        }
    }
    path
}

/// Classify one entry against the filesystem
pub fn classify(entry: &ManifestEntry, install_root: &Path, checksum: ChecksumType) -> FileStatus {
    let path = resolve_path(install_root, entry.relative_path());

    match checksum.digest_file(&path) {
        Ok(actual) if hashes_match(&actual, entry.expected_hash()) => FileStatus::UpToDate,
        Ok(actual) => {
            debug!(
                "{} has hash {}, expected {}",
                path.display(),
                actual,
                entry.expected_hash()
            );
            FileStatus::Stale
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileStatus::Missing,
        Err(e) => {
            debug!("Could not read {}: {}, treating as stale", path.display(), e);
            FileStatus::Stale
        }
    }
}
