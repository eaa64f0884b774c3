//! ETag computation for rendered documents.

use sha2::{Digest, Sha256};

/// Quoted SHA-256 hex digest of `bytes`.
pub fn compute_etag(bytes: &[u8]) -> String {
  let hash = Sha256::digest(bytes);
  format!("\"{}\"", hex::encode(hash))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_bytes_same_etag() {
    assert_eq!(compute_etag(b"invoice"), compute_etag(b"invoice"));
    assert_ne!(compute_etag(b"invoice"), compute_etag(b"invoice "));
  }

  #[test]
  fn etag_is_quoted_hex() {
    let etag = compute_etag(b"");
    assert_eq!(
      etag,
      "\"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\""
    );
  }
}
