// src/reconcile.rs

//! Update list construction

use crate::checksum::ChecksumType;
use crate::inspect::{FileStatus, classify};
use crate::manifest::{Manifest, ManifestEntry};
use std::path::Path;
use tracing::info;

/// A manifest entry that has to be downloaded, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub entry: ManifestEntry,
    pub status: FileStatus,
}

/// Entries needing a download, in manifest order
pub type UpdateList = Vec<PendingUpdate>;

/// Classify every manifest entry and keep the ones that are stale or missing
///
/// Computed fresh from the filesystem on every call. Works the same whether or
/// not the manifest names a download location.
pub fn build_update_list(manifest: &Manifest, install_root: &Path, checksum: ChecksumType) -> UpdateList {
    info!("Generating list of files to update");

    let updates: UpdateList = manifest
        .entries()
        .iter()
        .filter_map(|entry| {
            let status = classify(entry, install_root, checksum);
            status.needs_update().then(|| PendingUpdate {
                entry: entry.clone(),
                status,
            })
        })
        .collect();

    info!(
        "{} of {} files are out of date or missing",
        updates.len(),
        manifest.entries().len()
    );
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest;
    use std::fs;

    fn sha1(bytes: &[u8]) -> String {
        ChecksumType::Sha1.digest(bytes)
    }

    #[test]
    fn test_missing_file_is_pending() {
        let dir = tempfile::tempdir().unwrap();
        let raw = format!("v1\thttp://cdn.example/files\na.txt\t{}\n", sha1(b"a"));
        let manifest = manifest::parse(raw.as_bytes());

        let updates = build_update_list(&manifest, dir.path(), ChecksumType::Sha1);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].entry.relative_path(), "a.txt");
        assert_eq!(updates[0].status, FileStatus::Missing);
    }

    #[test]
    fn test_matching_file_is_not_pending() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        let manifest = Manifest::new("http://x", vec![ManifestEntry::new("a.txt", sha1(b"a"))]);

        assert!(build_update_list(&manifest, dir.path(), ChecksumType::Sha1).is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.txt"), b"ok").unwrap();
        fs::write(dir.path().join("stale.txt"), b"old").unwrap();

        let manifest = Manifest::new(
            "http://x",
            vec![
                ManifestEntry::new("z.txt", sha1(b"z")),
                ManifestEntry::new("ok.txt", sha1(b"ok")),
                ManifestEntry::new("stale.txt", sha1(b"new")),
                ManifestEntry::new("z.txt", sha1(b"z")),
            ],
        );

        let updates = build_update_list(&manifest, dir.path(), ChecksumType::Sha1);
        let summary: Vec<(&str, FileStatus)> = updates
            .iter()
            .map(|u| (u.entry.relative_path(), u.status))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("z.txt", FileStatus::Missing),
                ("stale.txt", FileStatus::Stale),
                ("z.txt", FileStatus::Missing),
            ]
        );
    }

    #[test]
    fn test_empty_base_url_still_reconciles() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::new("", vec![ManifestEntry::new("a.txt", sha1(b"a"))]);

        assert_eq!(build_update_list(&manifest, dir.path(), ChecksumType::Sha1).len(), 1);
    }

    #[test]
    fn test_recomputed_after_filesystem_change() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::new("http://x", vec![ManifestEntry::new("a.txt", sha1(b"a"))]);

        assert_eq!(build_update_list(&manifest, dir.path(), ChecksumType::Sha1).len(), 1);
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        assert!(build_update_list(&manifest, dir.path(), ChecksumType::Sha1).is_empty());
    }
}
