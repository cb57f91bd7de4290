//! Acquisition of the external lint tool.
//!
//! The tool is downloaded once into the build root and re-verified against its
//! pinned digest on every run, so a corrupted or tampered cached copy is never
//! used.

mod descriptor;
mod fetch;
mod verify;

use std::path::PathBuf;

use thiserror::Error;

use crate::util::hash::HashError;

pub use descriptor::{ChecksumAlgorithm, ToolDescriptor, ToolOverrides};
pub use fetch::{DownloadOptions, DownloadOutcome, download, ensure_directory};
pub use verify::verify;

#[derive(Debug, Error)]
pub enum ToolError {
  /// HTTP request failed or returned a non-success status.
  #[error("fetch failed for {url}: {message}")]
  FetchFailed { url: String, message: String },

  /// The file on disk does not have the pinned digest.
  #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
  ChecksumMismatch {
    path: PathBuf,
    expected: String,
    actual: String,
  },

  #[error("unsupported checksum algorithm '{0}' (supported: SHA-256, SHA-512)")]
  UnsupportedAlgorithm(String),

  #[error(transparent)]
  Hash(#[from] HashError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
