// src/manifest/source.rs

//! Where manifest bytes come from

use crate::config::SyncOptions;
use crate::error::{Error, Result};
use crate::repository::RemoteStore;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Manifest location for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A manifest file on disk; the network is never touched
    Local(PathBuf),
    /// The update server endpoint
    Remote(String),
}

impl ManifestSource {
    /// Pick the source the options ask for. A local path wins.
    pub fn from_options(options: &SyncOptions) -> Self {
        match &options.manifest_path {
            Some(path) => ManifestSource::Local(path.clone()),
            None => ManifestSource::Remote(options.manifest_url.clone()),
        }
    }

    /// Read the raw manifest bytes
    ///
    /// Returns `Error::ManifestNotFound` when a local file is missing and
    /// `Error::DownloadError` when the remote request fails.
    pub fn obtain(&self, store: &dyn RemoteStore) -> Result<Vec<u8>> {
        match self {
            ManifestSource::Local(path) => {
                if !path.exists() {
                    return Err(Error::ManifestNotFound(path.clone()));
                }
                info!("Reading manifest file {}", path.display());
                Ok(fs::read(path)?)
            }
            ManifestSource::Remote(url) => {
                info!("Retrieving latest version listings from {}", url);
                store.fetch_manifest(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Store that counts requests and always fails
    struct CountingStore {
        calls: Cell<usize>,
    }

    impl RemoteStore for CountingStore {
        fn fetch_manifest(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Err(Error::DownloadError("offline".to_string()))
        }

        fn fetch_object(&self, _base_url: &str, _hash: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Err(Error::DownloadError("offline".to_string()))
        }
    }

    #[test]
    fn test_local_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.txt");
        fs::write(&path, b"v1\thttp://x\n").unwrap();

        let store = CountingStore { calls: Cell::new(0) };
        let bytes = ManifestSource::Local(path).obtain(&store).unwrap();

        assert_eq!(bytes, b"v1\thttp://x\n");
        assert_eq!(store.calls.get(), 0);
    }

    #[test]
    fn test_missing_local_manifest_makes_no_request() {
        let store = CountingStore { calls: Cell::new(0) };
        let result = ManifestSource::Local(PathBuf::from("/nonexistent/manifest.txt")).obtain(&store);

        assert!(matches!(result, Err(Error::ManifestNotFound(_))));
        assert_eq!(store.calls.get(), 0);
    }

    #[test]
    fn test_remote_failure_is_propagated() {
        let store = CountingStore { calls: Cell::new(0) };
        let result = ManifestSource::Remote("http://update.invalid/".to_string()).obtain(&store);

        assert!(matches!(result, Err(Error::DownloadError(_))));
        assert_eq!(store.calls.get(), 1);
    }

    #[test]
    fn test_from_options_prefers_local_path() {
        let mut options = SyncOptions::new("/tmp/root");
        assert_eq!(
            ManifestSource::from_options(&options),
            ManifestSource::Remote(crate::config::DEFAULT_MANIFEST_URL.to_string())
        );

        options.manifest_path = Some(PathBuf::from("m.txt"));
        assert_eq!(
            ManifestSource::from_options(&options),
            ManifestSource::Local(PathBuf::from("m.txt"))
        );
    }
}
