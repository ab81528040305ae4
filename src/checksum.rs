// src/checksum.rs

//! Content hashing
//!
//! The same digest both names remote content and verifies local files, so
//! every comparison in the crate goes through this module.

use crate::error::Error;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Checksum algorithm used for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumType {
    /// SHA-1 (40 hex characters, what the update server publishes)
    #[default]
    Sha1,

    /// SHA-256 (64 hex characters)
    Sha256,
}

impl ChecksumType {
    pub fn as_str(&self) -> &str {
        match self {
            ChecksumType::Sha1 => "sha1",
            ChecksumType::Sha256 => "sha256",
        }
    }

    /// Length of a rendered digest in hex characters
    pub fn hex_len(&self) -> usize {
        match self {
            ChecksumType::Sha1 => 40,
            ChecksumType::Sha256 => 64,
        }
    }

    /// Hash an in-memory buffer, returning lowercase hex
    pub fn digest(&self, bytes: &[u8]) -> String {
        match self {
            ChecksumType::Sha1 => format!("{:x}", Sha1::digest(bytes)),
            ChecksumType::Sha256 => format!("{:x}", Sha256::digest(bytes)),
        }
    }

    /// Hash everything a reader yields
    pub fn digest_reader<R: Read>(&self, reader: &mut R) -> io::Result<String> {
        match self {
            ChecksumType::Sha1 => {
                let mut hasher = Sha1::new();
                io::copy(reader, &mut hasher)?;
                Ok(format!("{:x}", hasher.finalize()))
            }
            ChecksumType::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(reader, &mut hasher)?;
                Ok(format!("{:x}", hasher.finalize()))
            }
        }
    }

    /// Hash a file on disk without loading it whole
    pub fn digest_file(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        self.digest_reader(&mut file)
    }
}

impl FromStr for ChecksumType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(ChecksumType::Sha1),
            "sha256" | "sha-256" => Ok(ChecksumType::Sha256),
            _ => Err(Error::ParseError(format!("Invalid checksum type: {}", s))),
        }
    }
}

/// Compare two hex digests, ignoring ASCII case
pub fn hashes_match(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}
