//! Employee directory lookup.
//!
//! Subject records keyed by employee id, loaded once per run from a JSON
//! file of the form `{"EMP001": {"external_id": "H001"}}`. The pipeline
//! only ever looks records up; it never mutates them.

use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{DirectoryError, DirectoryParseSnafu, DirectoryReadSnafu};

/// One directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeRecord {
    /// Delivery-target identifier at the downstream endpoint.
    pub external_id: String,
}

/// Directory of employees eligible for delivery.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    records: HashMap<String, EmployeeRecord>,
}

impl EmployeeDirectory {
    /// Build a directory from an in-memory map (tests, embedding).
    pub fn from_records(records: HashMap<String, EmployeeRecord>) -> Self {
        Self { records }
    }

    /// Load the directory from a JSON file.
    pub async fn load(path: &Path) -> Result<Self, DirectoryError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .context(DirectoryReadSnafu { path })?;
        let records = serde_json::from_str(&contents).context(DirectoryParseSnafu)?;
        Ok(Self { records })
    }

    /// Look up an employee by id.
    pub fn find(&self, employee_id: &str) -> Option<&EmployeeRecord> {
        self.records.get(employee_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_and_find() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("employees.json");
        tokio::fs::write(&path, r#"{"EMP001": {"external_id": "H001"}}"#)
            .await
            .unwrap();

        let directory = EmployeeDirectory::load(&path).await.unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.find("EMP001").unwrap().external_id, "H001");
        assert!(directory.find("EMP999").is_none());
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("employees.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = EmployeeDirectory::load(&path).await.unwrap_err();
        assert!(matches!(err, DirectoryError::DirectoryParse { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = EmployeeDirectory::load(&temp_dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::DirectoryRead { .. }));
    }
}
