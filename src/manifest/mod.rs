// src/manifest/mod.rs

//! Update manifest model and parser
//!
//! The manifest is a tab-separated text file. The first line is a header whose
//! second field is the base download URL; every following line names one file
//! and the hash its content must have:
//!
//! ```text
//! <version>\t<base download url>
//! <relative path>\t<hex hash>
//! <relative path>\t<hex hash>
//! ```
//!
//! Parsing never fails. Lines that do not have exactly two fields are dropped,
//! and a header without a second field yields an empty base URL.

pub mod source;

pub use source::ManifestSource;

use tracing::debug;

/// A single file the installation is expected to contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    relative_path: String,
    expected_hash: String,
}

impl ManifestEntry {
    pub fn new(relative_path: impl Into<String>, expected_hash: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            expected_hash: expected_hash.into(),
        }
    }

    /// Path relative to the install root, `/`-separated as published
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Hex digest the file content must have (not validated)
    pub fn expected_hash(&self) -> &str {
        &self.expected_hash
    }
}

/// Parsed update manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    base_url: String,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(base_url: impl Into<String>, entries: Vec<ManifestEntry>) -> Self {
        Self {
            base_url: base_url.into(),
            entries,
        }
    }

    /// Base URL content is fetched from; empty when the header was malformed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Entries in manifest line order, duplicates included
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Whether a download location was published
    pub fn has_remote(&self) -> bool {
        !self.base_url.is_empty()
    }
}

/// Parse raw manifest bytes
pub fn parse(raw: &[u8]) -> Manifest {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let base_url = lines
        .next()
        .and_then(|header| header.split('\t').nth(1))
        .unwrap_or_default()
        .to_string();

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            [path, hash] if !path.is_empty() => entries.push(ManifestEntry::new(*path, *hash)),
            _ => skipped += 1,
        }
    }

    debug!(
        "Parsed manifest: {} entries, {} skipped lines, base URL {:?}",
        entries.len(),
        skipped,
        base_url
    );

    Manifest { base_url, entries }
}
