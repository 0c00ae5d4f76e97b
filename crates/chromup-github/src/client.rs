use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::release::Release;

/// Blocking HTTP client for the release feed and asset downloads.
pub struct ReleaseClient {
    http: reqwest::blocking::Client,
}

impl ReleaseClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("chromup/", env!("CARGO_PKG_VERSION")))
            // Connect timeout only; a full-archive download has no deadline.
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network { source: e })?;
        Ok(Self { http })
    }

    /// Fetch and decode the release document at `feed_url`.
    pub fn latest_release(&self, feed_url: &str) -> Result<Release> {
        tracing::debug!(feed_url, "fetching release metadata");
        let response = self
            .http
            .get(feed_url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|e| Error::Network { source: e })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
            });
        }
        response.json().map_err(|e| Error::Decode { source: e })
    }

    /// Stream `url` into the file at `dest`, reporting progress as
    /// (bytes so far, declared content length). Returns the byte count.
    ///
    /// A failed transfer leaves the partial file in place for inspection;
    /// re-running the download truncates it.
    pub fn download(
        &self,
        url: &str,
        dest: &Path,
        mut on_progress: impl FnMut(u64, Option<u64>),
    ) -> Result<u64> {
        tracing::debug!(url, dest = %dest.display(), "downloading asset");
        let mut response = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::Network { source: e })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status(),
            });
        }
        let total = response.content_length();

        let mut file = File::create(dest).map_err(|e| Error::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let mut downloaded = 0u64;
        let mut buffer = [0u8; 64 * 1024];
        loop {
            let n = response
                .read(&mut buffer)
                .map_err(|e| Error::Stream { source: e })?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n]).map_err(|e| Error::Io {
                path: dest.to_path_buf(),
                source: e,
            })?;
            downloaded += n as u64;
            on_progress(downloaded, total);
        }

        tracing::debug!(bytes = downloaded, "download finished");
        Ok(downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        assert!(ReleaseClient::new().is_ok());
    }
}
