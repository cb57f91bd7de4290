use std::path::Path;

use tracing::{error, info};

use crate::util::hash::{hash_file, hash_file_sha512};

use super::{ChecksumAlgorithm, ToolError};

/// Recompute the digest of `path` and compare it with `expected_hex`.
///
/// The comparison ignores hex letter case. Nothing is cached between calls.
pub fn verify(path: &Path, expected_hex: &str, algorithm: ChecksumAlgorithm) -> Result<(), ToolError> {
  let actual = match algorithm {
    ChecksumAlgorithm::Sha256 => hash_file(path)?,
    ChecksumAlgorithm::Sha512 => hash_file_sha512(path)?,
  };

  if !actual.matches(expected_hex) {
    error!(
      path = %path.display(),
      algorithm = %algorithm,
      expected = %expected_hex,
      actual = %actual,
      "checksum mismatch"
    );
    return Err(ToolError::ChecksumMismatch {
      path: path.to_path_buf(),
      expected: expected_hex.to_string(),
      actual: actual.0,
    });
  }

  info!(path = %path.display(), algorithm = %algorithm, "checksum verified");
  Ok(())
}
