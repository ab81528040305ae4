// src/fetch.rs

//! Hash-verified download of pending updates
//!
//! Entries are processed one at a time, in update-list order. Each download
//! is hashed before anything touches the disk; content that does not match is
//! dropped and the existing file stays as it was. Failures are recorded per
//! entry and never stop the batch.

use crate::checksum::{ChecksumType, hashes_match};
use crate::error::{Error, Result};
use crate::inspect::resolve_path;
use crate::manifest::ManifestEntry;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::reconcile::UpdateList;
use crate::repository::RemoteStore;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// What happened to one pending entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Verified and written to disk
    Saved,
    /// Downloaded content hashed to `actual`; nothing was written
    HashMismatch { actual: String },
    /// The request failed
    TransportError(String),
    /// Verified content could not be written
    WriteFailed(String),
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved)
    }
}

/// Result of one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub entry: ManifestEntry,
    pub outcome: Outcome,
}

/// Downloads pending entries into an install root
pub struct Fetcher<'a> {
    store: &'a dyn RemoteStore,
    install_root: &'a Path,
    checksum: ChecksumType,
}

impl<'a> Fetcher<'a> {
    pub fn new(store: &'a dyn RemoteStore, install_root: &'a Path, checksum: ChecksumType) -> Self {
        Self {
            store,
            install_root,
            checksum,
        }
    }

    /// Download every entry of `updates` from the store at `base_url`
    ///
    /// Returns one result per entry, in order. Fails only when `base_url` is
    /// empty, before any request is made.
    pub fn run(
        &self,
        updates: &UpdateList,
        base_url: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<DownloadResult>> {
        if base_url.is_empty() {
            return Err(Error::NoRemoteConfigured);
        }

        let total = updates.len();
        let mut results = Vec::with_capacity(total);
        if total == 0 {
            return Ok(results);
        }

        progress.report(ProgressEvent::BatchStarted { total });

        for (i, pending) in updates.iter().enumerate() {
            let index = i + 1;
            let entry = &pending.entry;
            progress.report(ProgressEvent::FileStarted {
                index,
                total,
                name: entry.relative_path(),
                percent: index as f64 / total as f64 * 100.0,
            });

            let outcome = self.fetch_one(entry, base_url);
            if let Some(message) = warning_for(entry, &outcome) {
                warn!("{}", message);
                progress.report(ProgressEvent::Warning {
                    name: entry.relative_path(),
                    message,
                });
            }

            results.push(DownloadResult {
                entry: entry.clone(),
                outcome,
            });
        }

        let saved = results.iter().filter(|r| r.outcome.is_saved()).count();
        info!("Updated {} of {} files", saved, total);
        progress.report(ProgressEvent::BatchFinished { saved, total });

        Ok(results)
    }

    fn fetch_one(&self, entry: &ManifestEntry, base_url: &str) -> Outcome {
        let dest_path = resolve_path(self.install_root, entry.relative_path());

        if let Some(parent) = dest_path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            return Outcome::WriteFailed(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ));
        }

        let bytes = match self.store.fetch_object(base_url, entry.expected_hash()) {
            Ok(bytes) => bytes,
            Err(e) => return Outcome::TransportError(e.to_string()),
        };

        let actual = self.checksum.digest(&bytes);
        if !hashes_match(&actual, entry.expected_hash()) {
            return Outcome::HashMismatch { actual };
        }

        match write_replace(&dest_path, &bytes) {
            Ok(()) => {
                debug!("Saved {} ({} bytes)", dest_path.display(), bytes.len());
                Outcome::Saved
            }
            Err(e) => Outcome::WriteFailed(format!(
                "Failed to write {}: {}",
                dest_path.display(),
                e
            )),
        }
    }
}

fn warning_for(entry: &ManifestEntry, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Saved => None,
        Outcome::HashMismatch { actual } => Some(format!(
            "File {} has wrong hash, expected {}, got {}",
            entry.relative_path(),
            entry.expected_hash(),
            actual
        )),
        Outcome::TransportError(e) => Some(format!(
            "File {} could not be downloaded: {}",
            entry.relative_path(),
            e
        )),
        Outcome::WriteFailed(e) => Some(format!("File {} was not saved: {}", entry.relative_path(), e)),
    }
}

/// Write through a temp file in the same directory, then rename over `dest`
fn write_replace(dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
