//! Input-file discovery.
//!
//! Lists payslip PDFs directly inside the input directory (no recursion)
//! and sorts them lexicographically by path, so every run processes
//! candidates in a deterministic order.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// File extension expected for payslip candidates.
pub const PAYSLIP_EXT: &str = "pdf";

/// List candidate payslip files in `folder`, sorted by path.
///
/// A missing or unreadable input directory is fatal for the run.
/// Subdirectories and non-`.pdf` entries are ignored.
pub async fn list_payslips(folder: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut entries =
        tokio::fs::read_dir(folder)
            .await
            .map_err(|source| PipelineError::ListInput {
                path: folder.to_path_buf(),
                source,
            })?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| PipelineError::ListInput {
            path: folder.to_path_buf(),
            source,
        })?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| PipelineError::ListInput {
                path: folder.to_path_buf(),
                source,
            })?;

        let path = entry.path();
        if file_type.is_file() && path.extension().is_some_and(|ext| ext == PAYSLIP_EXT) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
