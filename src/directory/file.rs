//! JSON file directory adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ShelterDirectory;
use super::document::{ShelterDocument, parse_documents};
use crate::error::DirectoryError;

/// Shelter directory stored as a local JSON file
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ShelterDirectory for FileDirectory {
    async fn fetch_documents(&self) -> Result<Vec<ShelterDocument>, DirectoryError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DirectoryError::NotFound(self.describe()),
                _ => DirectoryError::Read(format!("{}: {}", self.describe(), e)),
            })?;

        parse_documents(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_array_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelters.json");
        std::fs::write(
            &path,
            r#"[{ "id": "s1", "name": "Welcome Hall Mission", "address": "606 Rue de Courcelle" }]"#,
        )
        .unwrap();

        let docs = FileDirectory::new(&path).fetch_documents().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = FileDirectory::new(dir.path().join("absent.json"))
            .fetch_documents()
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelters.json");
        std::fs::write(&path, "{ broken").unwrap();

        let err = FileDirectory::new(&path).fetch_documents().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }
}
