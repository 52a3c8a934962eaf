//! Content fingerprinting for dedup.
//!
//! Computes a streaming SHA-256 digest over a file's full byte content.
//! The digest is the dedup key: identical bytes always hash identically,
//! regardless of filename.

use sha2::{Digest, Sha256};
use snafu::ResultExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};

use crate::error::{ChecksumError, OpenSnafu, ReadSnafu};

/// Read buffer size for hashing. Memory use is independent of file size.
const CHUNK_SIZE: usize = 8192;

/// Compute the hex-encoded SHA-256 digest of a file's contents.
///
/// Reads the file in [`CHUNK_SIZE`] chunks. An I/O failure here is fatal
/// for the file being processed, not for the run.
pub async fn sha256_file(path: &Path) -> Result<String, ChecksumError> {
    let file = File::open(path).await.context(OpenSnafu { path })?;
    let mut reader = BufReader::new(file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).await.context(ReadSnafu { path })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_digest_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.pdf");
        let b = temp_dir.path().join("b.pdf");
        tokio::fs::write(&a, b"mock-pdf").await.unwrap();
        tokio::fs::write(&b, b"mock-pdf").await.unwrap();

        let digest_a = sha256_file(&a).await.unwrap();
        let digest_b = sha256_file(&b).await.unwrap();

        // Same bytes, different names: same fingerprint
        assert_eq!(digest_a, digest_b);
        assert_eq!(digest_a.len(), 64);
    }

    #[tokio::test]
    async fn test_digest_differs_on_content() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.pdf");
        let b = temp_dir.path().join("b.pdf");
        tokio::fs::write(&a, b"mock-pdf").await.unwrap();
        tokio::fs::write(&b, b"mock-pdf-2").await.unwrap();

        assert_ne!(
            sha256_file(&a).await.unwrap(),
            sha256_file(&b).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_known_vector() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.pdf");
        tokio::fs::write(&path, b"").await.unwrap();

        assert_eq!(
            sha256_file(&path).await.unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let err = sha256_file(&temp_dir.path().join("nope.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChecksumError::Open { .. }));
    }
}
