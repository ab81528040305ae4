// src/repository/mod.rs

//! Remote content store access
//!
//! This module provides:
//! - The `RemoteStore` trait the pipeline talks to
//! - `RepositoryClient`, a blocking HTTP implementation that keeps one
//!   connection pool alive for the whole run
//!
//! Content is addressed by hash: an object lives at `{base_url}/{hash}`.
//! There are no retries; a failed request is reported to the caller as-is.

use crate::config::MANIFEST_USER_AGENT;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

/// Source of manifest and content bytes
pub trait RemoteStore {
    /// Fetch the raw manifest published at `url`
    fn fetch_manifest(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch the object named `hash` from the store rooted at `base_url`
    fn fetch_object(&self, base_url: &str, hash: &str) -> Result<Vec<u8>>;
}

/// Build the URL of a content-addressed object
pub fn object_url(base_url: &str, hash: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), hash)
}

/// HTTP client for the update server and content store
pub struct RepositoryClient {
    client: Client,
    manifest_user_agent: String,
}

impl RepositoryClient {
    /// Create a new repository client
    pub fn new() -> Result<Self> {
        Self::with_user_agent(MANIFEST_USER_AGENT)
    }

    /// Create a client that identifies itself with `user_agent` on manifest requests
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            manifest_user_agent: user_agent.to_string(),
        })
    }

    fn get_bytes(&self, url: &str, user_agent: Option<&str>) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .map_err(|e| Error::DownloadError(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::DownloadError(format!("Failed to read response from {}: {}", url, e)))?;

        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

impl RemoteStore for RepositoryClient {
    fn fetch_manifest(&self, url: &str) -> Result<Vec<u8>> {
        self.get_bytes(url, Some(self.manifest_user_agent.as_str()))
    }

    fn fetch_object(&self, base_url: &str, hash: &str) -> Result<Vec<u8>> {
        self.get_bytes(&object_url(base_url, hash), None)
    }
}
