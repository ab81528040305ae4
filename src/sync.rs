// src/sync.rs

//! One synchronization run, end to end
//!
//! manifest source -> parser -> update list -> confirmation -> fetcher
//!
//! Nothing is kept between runs. The returned `SyncReport` says how far the
//! run got; deciding what to print or which exit status to use is left to the
//! caller.

use crate::config::SyncOptions;
use crate::error::Result;
use crate::fetch::{DownloadResult, Fetcher};
use crate::manifest::{self, Manifest, ManifestSource};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::prompt::Confirm;
use crate::reconcile::{UpdateList, build_update_list};
use crate::repository::RemoteStore;
use tracing::{info, warn};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    /// No manifest could be read; nothing was done
    ManifestUnavailable,
    /// Every file matches the manifest
    UpToDate,
    /// Check-only run; `pending` files need an update
    CheckOnly { pending: usize },
    /// Files need an update but the manifest names no download location
    NoRemote { pending: usize },
    /// The user declined the update
    Declined { pending: usize },
    /// Downloads were attempted
    Applied { results: Vec<DownloadResult> },
}

impl SyncReport {
    /// Number of files written this run
    pub fn saved_count(&self) -> usize {
        match self {
            SyncReport::Applied { results } => results.iter().filter(|r| r.outcome.is_saved()).count(),
            _ => 0,
        }
    }

    /// Number of attempted downloads that were not saved
    pub fn failed_count(&self) -> usize {
        match self {
            SyncReport::Applied { results } => results.iter().filter(|r| !r.outcome.is_saved()).count(),
            _ => 0,
        }
    }
}

/// Obtain and parse the manifest, or `None` if it is unavailable
pub fn load_manifest(options: &SyncOptions, store: &dyn RemoteStore) -> Option<Manifest> {
    let source = ManifestSource::from_options(options);
    match source.obtain(store) {
        Ok(raw) => Some(manifest::parse(&raw)),
        Err(e) => {
            warn!("Manifest unavailable: {}", e);
            None
        }
    }
}

/// Run one synchronization pass
pub fn run(
    options: &SyncOptions,
    store: &dyn RemoteStore,
    confirm: &mut dyn Confirm,
    progress: &mut dyn ProgressSink,
) -> Result<SyncReport> {
    let Some(manifest) = load_manifest(options, store) else {
        return Ok(SyncReport::ManifestUnavailable);
    };

    let updates = build_update_list(&manifest, options.install_root(), options.checksum);
    if options.verbose {
        report_outdated(&updates, progress);
    }

    let pending = updates.len();
    if pending == 0 {
        return Ok(SyncReport::UpToDate);
    }
    if options.check_only {
        return Ok(SyncReport::CheckOnly { pending });
    }
    if !manifest.has_remote() {
        warn!("Manifest has no download location; {} files cannot be updated", pending);
        return Ok(SyncReport::NoRemote { pending });
    }
    if !options.assume_yes && !confirm.confirm(pending) {
        info!("Update of {} files declined", pending);
        return Ok(SyncReport::Declined { pending });
    }

    let fetcher = Fetcher::new(store, options.install_root(), options.checksum);
    let results = fetcher.run(&updates, manifest.base_url(), progress)?;
    Ok(SyncReport::Applied { results })
}

fn report_outdated(updates: &UpdateList, progress: &mut dyn ProgressSink) {
    for pending in updates {
        progress.report(ProgressEvent::Outdated {
            name: pending.entry.relative_path(),
            status: pending.status,
            expected: pending.entry.expected_hash(),
        });
    }
}
