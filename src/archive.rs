//! Archival of delivered payslips.
//!
//! A full durable copy into the archive directory, standing in for
//! encrypted object storage. The source file is left in place. Archive
//! failures are not retried: they abort the file before the dedup entry
//! is written, so a later run can reattempt delivery and archival.

use snafu::ResultExt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ArchiveError, CopySnafu, CreateDirSnafu};

/// Copies delivered files into an archive directory.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    dir: PathBuf,
}

impl ArchiveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Archive one file, creating the archive directory if absent.
    ///
    /// Returns the path of the archived copy.
    pub async fn archive(&self, src: &Path) -> Result<PathBuf, ArchiveError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .context(CreateDirSnafu { path: &self.dir })?;

        let file_name = src.file_name().unwrap_or(src.as_os_str());
        let target = self.dir.join(file_name);

        tokio::fs::copy(src, &target)
            .await
            .context(CopySnafu { src })?;

        info!(path = %target.display(), "Archive written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_archive_copies_and_keeps_source() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("EMP001_202501.pdf");
        tokio::fs::write(&src, b"mock-pdf").await.unwrap();

        let store = ArchiveStore::new(temp_dir.path().join("archive"));
        let archived = store.archive(&src).await.unwrap();

        assert_eq!(
            archived,
            temp_dir.path().join("archive").join("EMP001_202501.pdf")
        );
        assert_eq!(tokio::fs::read(&archived).await.unwrap(), b"mock-pdf");
        // Copy, not move
        assert!(src.exists());
    }

    #[tokio::test]
    async fn test_archive_missing_source_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(temp_dir.path().join("archive"));

        let err = store
            .archive(&temp_dir.path().join("nope.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Copy { .. }));
    }
}
