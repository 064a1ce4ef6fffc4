//! Shelter directory loader
//!
//! Reads shelter documents from a JSON file or an HTTP collection endpoint and
//! maps them to [`ShelterRecord`]s.

pub mod document;
pub mod file;
#[cfg(test)]
pub mod fixtures;
pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::DirectoryError;
use crate::models::ShelterRecord;

pub use document::ShelterDocument;
pub use file::FileDirectory;
pub use http::HttpDirectory;

/// Source of shelter documents
#[async_trait]
pub trait ShelterDirectory: Send + Sync {
    /// Fetch every stored document, in directory order.
    async fn fetch_documents(&self) -> Result<Vec<ShelterDocument>, DirectoryError>;

    /// Human-readable location of the directory
    fn describe(&self) -> String;
}

/// Usable records plus the number of documents that were skipped
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    pub shelters: Vec<ShelterRecord>,
    pub excluded: usize,
}

/// Load and map every document, excluding those without a name or address.
pub async fn load_shelters(
    directory: &dyn ShelterDirectory,
) -> Result<DirectoryListing, DirectoryError> {
    let documents = directory.fetch_documents().await?;

    let mut listing = DirectoryListing::default();
    for (index, document) in documents.into_iter().enumerate() {
        match document.into_record(index) {
            Some(record) => listing.shelters.push(record),
            None => {
                debug!("Excluding directory document {}: missing name or address", index);
                listing.excluded += 1;
            }
        }
    }

    debug!(
        "Loaded {} shelters from {} ({} excluded)",
        listing.shelters.len(),
        directory.describe(),
        listing.excluded
    );
    Ok(listing)
}

/// Pick an adapter for a configured source: `http(s)://` URLs are fetched,
/// anything else is read as a file path.
pub fn open_directory(
    source: &str,
    timeout: Duration,
) -> Result<Box<dyn ShelterDirectory>, DirectoryError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(DirectoryError::NotConfigured);
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(Box::new(HttpDirectory::new(source, timeout)?))
    } else {
        Ok(Box::new(FileDirectory::new(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::StaticDirectory;

    #[tokio::test]
    async fn test_load_preserves_order_and_counts_excluded() {
        let directory = StaticDirectory::from_json(
            r#"[
                { "id": "b", "name": "Second", "address": "2 Rue" },
                { "id": "x", "address": "nameless" },
                { "id": "a", "name": "First", "address": "1 Rue" },
                { "name": "No address" }
            ]"#,
        );

        let listing = load_shelters(&directory).await.unwrap();
        let ids: Vec<&str> = listing.shelters.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(listing.excluded, 2);
    }

    #[tokio::test]
    async fn test_positional_ids_use_document_index() {
        let directory = StaticDirectory::from_json(
            r#"[
                { "address": "skipped" },
                { "name": "Anonymous", "address": "3 Rue" }
            ]"#,
        );

        let listing = load_shelters(&directory).await.unwrap();
        assert_eq!(listing.shelters[0].id, "shelter-1");
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let directory = StaticDirectory::failing("disk on fire");
        let err = load_shelters(&directory).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Read(_)));
    }

    #[test]
    fn test_open_directory_picks_adapter() {
        let timeout = Duration::from_secs(1);
        let http = open_directory("https://example.org/shelters", timeout).unwrap();
        assert_eq!(http.describe(), "https://example.org/shelters");

        let file = open_directory("./shelters.json", timeout).unwrap();
        assert_eq!(file.describe(), "./shelters.json");

        assert!(matches!(
            open_directory("  ", timeout),
            Err(DirectoryError::NotConfigured)
        ));
    }
}
