//! Blocking HTTP: listing fetch, archive probe, and streaming checksum.
//!
//! Every call builds its own client with the timeout the caller picked:
//! short for metadata, long for the archive download. Timeouts and
//! non-success statuses surface as the same network error kind.

use crate::error::{GoBumpError, Result};
use crate::ui;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::time::Duration;

/// User-Agent header sent with every request.
const USER_AGENT: &str = "go-bump";

const CHUNK_SIZE: usize = 8192;
const MIB: u64 = 1024 * 1024;

fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| GoBumpError::network(format!("cannot build HTTP client: {}", e)))
}

/// Fetches the release listing page as text.
pub fn fetch_listing(url: &str, timeout: Duration) -> Result<String> {
    let client = build_client(timeout)?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| GoBumpError::network(format!("listing fetch failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoBumpError::network(format!(
            "listing fetch returned HTTP {} from {}",
            status, url
        )));
    }

    response
        .text()
        .map_err(|e| GoBumpError::network(format!("cannot read listing body: {}", e)))
}

/// Confirms the archive exists without downloading it.
pub fn probe(url: &str, timeout: Duration) -> Result<()> {
    let client = build_client(timeout)?;
    let response = client
        .head(url)
        .send()
        .map_err(|e| GoBumpError::network(format!("archive probe failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoBumpError::network(format!(
            "archive not available: HTTP {} from {}",
            status, url
        )));
    }
    Ok(())
}

/// Streams the archive through SHA-256 and returns the lowercase hex digest.
///
/// The body is consumed in bounded chunks so the archive is never held in
/// memory whole. Progress is reported once per MiB consumed.
pub fn checksum(url: &str, timeout: Duration) -> Result<String> {
    let client = build_client(timeout)?;
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| GoBumpError::network(format!("archive download failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoBumpError::network(format!(
            "archive download returned HTTP {} from {}",
            status, url
        )));
    }

    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;
    let mut reported: u64 = 0;

    loop {
        let n = response
            .read(&mut buf)
            .map_err(|e| GoBumpError::network(format!("download interrupted: {}", e)))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        total += n as u64;
        if total / MIB > reported {
            reported = total / MIB;
            ui::display_status(&format!("Downloaded: {}MB", reported));
        }
    }

    ui::display_status(&format!("Download complete, {}MB total", total / MIB));
    Ok(format!("{:x}", hasher.finalize()))
}
