//! File digests for artifact verification.
//!
//! Files are hashed in fixed-size chunks so large artifacts never need to be
//! held in memory.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;

/// A lowercase hexadecimal digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// Compare against a hex string, ignoring ASCII case.
  pub fn matches(&self, expected_hex: &str) -> bool {
    self.0.eq_ignore_ascii_case(expected_hex.trim())
  }
}

impl fmt::Display for ContentHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Error)]
#[error("failed to read file {path}: {message}")]
pub struct HashError {
  pub path: String,
  pub message: String,
}

/// Hash a file's contents with an arbitrary digest.
pub fn digest_file<D: Digest>(path: &Path) -> Result<ContentHash, HashError> {
  let read_error = |e: std::io::Error| HashError {
    path: path.display().to_string(),
    message: e.to_string(),
  };

  let mut file = fs::File::open(path).map_err(read_error)?;
  let mut hasher = D::new();
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = file.read(&mut buffer).map_err(read_error)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(ContentHash(hex::encode(hasher.finalize())))
}

/// SHA-256 of a file.
pub fn hash_file(path: &Path) -> Result<ContentHash, HashError> {
  digest_file::<Sha256>(path)
}

/// SHA-512 of a file.
pub fn hash_file_sha512(path: &Path) -> Result<ContentHash, HashError> {
  digest_file::<Sha512>(path)
}

#[cfg(test)]
fn hash_bytes(data: &[u8]) -> ContentHash {
  ContentHash(hex::encode(Sha256::digest(data)))
}
