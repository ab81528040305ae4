// src/lib.rs

//! blsync
//!
//! Keeps a Blockland installation in line with the update server's manifest.
//!
//! # Architecture
//!
//! - Manifest: tab-separated list of relative paths and content hashes, plus
//!   the base URL of a content-addressed store
//! - Inspection: every installed file is hashed and classified as up to
//!   date, stale, or missing
//! - Fetching: pending files are downloaded one at a time by hash, verified,
//!   and only then written to disk
//! - Best effort: per-file failures are reported, never fatal

pub mod checksum;
pub mod config;
mod error;
pub mod fetch;
pub mod inspect;
pub mod manifest;
pub mod progress;
pub mod prompt;
pub mod reconcile;
pub mod repository;
pub mod sync;

pub use error::{Error, Result};
