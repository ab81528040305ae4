// src/config.rs

//! Resolved run options
//!
//! Argument parsing lives in the binary. The core only sees `SyncOptions`,
//! already resolved to concrete values.

use crate::checksum::ChecksumType;
use std::path::{Path, PathBuf};

/// Endpoint publishing the latest manifest
pub const DEFAULT_MANIFEST_URL: &str = "http://update.blockland.us/latestVersion.php";

/// User-Agent the update server expects on manifest requests
pub const MANIFEST_USER_AGENT: &str = "blocklandWIN/2.0";

/// Install directory name used when none is given, relative to the working directory
pub const DEFAULT_INSTALL_DIR: &str = "Blockland";

/// Options for one synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Directory the manifest paths are resolved against
    pub install_root: PathBuf,
    /// Read the manifest from this file instead of the update server
    pub manifest_path: Option<PathBuf>,
    /// Update server endpoint, used when `manifest_path` is unset
    pub manifest_url: String,
    /// Algorithm the manifest hashes were produced with
    pub checksum: ChecksumType,
    /// Report why each file needs an update
    pub verbose: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    /// Report pending updates without downloading anything
    pub check_only: bool,
    /// Treat any failed download as a failed run
    pub strict: bool,
}

impl SyncOptions {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            manifest_path: None,
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            checksum: ChecksumType::default(),
            verbose: false,
            assume_yes: false,
            check_only: false,
            strict: false,
        }
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }
}

/// Default install root: `<cwd>/Blockland`
pub fn default_install_root() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_INSTALL_DIR)
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new(default_install_root())
    }
}
