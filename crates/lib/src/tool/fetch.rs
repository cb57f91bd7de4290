//! Downloading the tool artifact.
//!
//! Downloads are conditional: when the destination already exists its
//! modification time is sent as `If-Modified-Since` and a `304` response
//! leaves the file alone. Fresh bytes are staged next to the destination and
//! renamed into place.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{IF_MODIFIED_SINCE, LAST_MODIFIED};
use tokio::fs;
use tracing::{debug, info};

use super::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOptions {
  /// Replace an existing destination file.
  pub overwrite: bool,
  /// Ask the server to skip the transfer if the destination is current.
  pub only_if_modified: bool,
}

impl Default for DownloadOptions {
  fn default() -> Self {
    Self {
      overwrite: true,
      only_if_modified: true,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
  /// New content was written.
  Downloaded { bytes: usize },
  /// The server reported the existing file as current.
  NotModified,
  /// The destination exists and overwriting is disabled.
  Skipped,
}

/// Create `path` and its parents if absent.
pub async fn ensure_directory(path: &Path) -> Result<(), ToolError> {
  fs::create_dir_all(path).await?;
  debug!(path = %path.display(), "ensured directory");
  Ok(())
}

/// Download `url` to `destination`.
///
/// The destination's directory must already exist. Network errors and
/// non-success statuses are returned as [`ToolError::FetchFailed`].
pub async fn download(url: &str, destination: &Path, options: DownloadOptions) -> Result<DownloadOutcome, ToolError> {
  info!(url = %url, destination = %destination.display(), "downloading");

  let existing = fs::metadata(destination).await.ok().filter(|m| m.is_file());

  if existing.is_some() && !options.overwrite {
    info!(destination = %destination.display(), "destination exists, skipping download");
    return Ok(DownloadOutcome::Skipped);
  }

  let fetch_failed = |message: String| ToolError::FetchFailed {
    url: url.to_string(),
    message,
  };

  let mut request = reqwest::Client::new().get(url);
  if options.only_if_modified
    && let Some(meta) = &existing
    && let Ok(modified) = meta.modified()
  {
    let since = http_date(modified);
    debug!(since = %since, "conditional request");
    request = request.header(IF_MODIFIED_SINCE, since);
  }

  let response = request.send().await.map_err(|e| fetch_failed(e.to_string()))?;

  if response.status() == StatusCode::NOT_MODIFIED {
    info!(destination = %destination.display(), "not modified, keeping existing file");
    return Ok(DownloadOutcome::NotModified);
  }

  if !response.status().is_success() {
    return Err(fetch_failed(format!("HTTP {}", response.status())));
  }

  let last_modified = response
    .headers()
    .get(LAST_MODIFIED)
    .and_then(|v| v.to_str().ok())
    .and_then(parse_http_date);

  let bytes = response.bytes().await.map_err(|e| fetch_failed(e.to_string()))?;

  let staged = staging_path(destination);
  fs::write(&staged, &bytes).await?;
  if let Some(modified) = last_modified {
    set_modified(&staged, modified)?;
  }
  fs::rename(&staged, destination).await?;

  info!(destination = %destination.display(), size = bytes.len(), "download complete");
  Ok(DownloadOutcome::Downloaded { bytes: bytes.len() })
}

fn staging_path(destination: &Path) -> PathBuf {
  let name = destination
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| "download".to_string());
  destination.with_file_name(format!(".{}.part", name))
}

/// Stamp the file with the server's modification time, so the next
/// conditional request compares against the origin's clock.
fn set_modified(path: &Path, modified: SystemTime) -> std::io::Result<()> {
  let file = std::fs::OpenOptions::new().write(true).open(path)?;
  file.set_modified(modified)
}

/// Format a time as an RFC 7231 HTTP-date.
pub(crate) fn http_date(time: SystemTime) -> String {
  let time: DateTime<Utc> = time.into();
  time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn parse_http_date(value: &str) -> Option<SystemTime> {
  DateTime::parse_from_rfc2822(value).ok().map(SystemTime::from)
}
