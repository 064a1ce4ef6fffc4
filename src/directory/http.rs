//! HTTP collection endpoint directory adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::ShelterDirectory;
use super::document::{ShelterDocument, parse_documents};
use crate::error::DirectoryError;

/// Shelter directory served as JSON over HTTP
pub struct HttpDirectory {
    http: HttpClient,
    url: String,
}

impl HttpDirectory {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Http(e.to_string()))?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl ShelterDirectory for HttpDirectory {
    async fn fetch_documents(&self) -> Result<Vec<ShelterDocument>, DirectoryError> {
        let response = self
            .http
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Http(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response.text().await?;
        parse_documents(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_wrapped_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/shelters")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "shelters": [
                    { "id": "a", "name": "Accueil Bonneau", "address": "427 Rue de la Commune Est" }
                ]}"#,
            )
            .create_async()
            .await;

        let directory =
            HttpDirectory::new(&format!("{}/shelters", server.url()), Duration::from_secs(5))
                .unwrap();
        let docs = directory.fetch_documents().await.unwrap();

        mock.assert_async().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name.as_deref(), Some("Accueil Bonneau"));
    }

    #[tokio::test]
    async fn test_error_status_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/shelters")
            .with_status(500)
            .create_async()
            .await;

        let directory =
            HttpDirectory::new(&format!("{}/shelters", server.url()), Duration::from_secs(5))
                .unwrap();
        let err = directory.fetch_documents().await.unwrap_err();

        match err {
            DirectoryError::Http(msg) => assert!(msg.contains("500")),
            other => panic!("Expected DirectoryError::Http, got {:?}", other),
        }
    }
}
