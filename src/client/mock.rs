//! Mock geocoder for testing
//!
//! Provides a scripted implementation of [`Geocoder`] so resolver tests can
//! run without a network.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{GeocodeCandidate, GeocodeResult, Geocoder};
use crate::error::GeocodeError;
use crate::models::GeoCoordinates;

/// Mock geocoding service.
///
/// Rules are matched by substring against the query, first match wins.
/// Unmatched queries return the fallback coordinate.
///
/// # Example
/// ```ignore
/// let mock = MockGeocoder::new()
///     .with_result("Clark", GeoCoordinates::fixed(45.50, -73.56)).await
///     .with_error("Bad Street", GeocodeError::Timeout).await;
/// ```
pub struct MockGeocoder {
    credentials: bool,
    rules: Arc<Mutex<Vec<(String, MockResponse)>>>,
    fallback: GeoCoordinates,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Found(GeoCoordinates),
    Failed(GeocodeError),
}

/// A captured geocoding request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub query: String,
    pub at: Instant,
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self {
            credentials: true,
            rules: Arc::new(Mutex::new(Vec::new())),
            fallback: GeoCoordinates::fixed(45.0, -73.0),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockGeocoder {
    /// Create a mock with credentials and no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a deployment without an API key.
    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    /// Return `coordinates` for queries containing `pattern`.
    pub async fn with_result(self, pattern: &str, coordinates: GeoCoordinates) -> Self {
        self.rules
            .lock()
            .await
            .push((pattern.to_string(), MockResponse::Found(coordinates)));
        self
    }

    /// Fail queries containing `pattern` with `error`.
    pub async fn with_error(self, pattern: &str, error: GeocodeError) -> Self {
        self.rules
            .lock()
            .await
            .push((pattern.to_string(), MockResponse::Failed(error)));
        self
    }

    /// Number of `geocode` calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// All captured calls, oldest first.
    pub async fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    fn has_credentials(&self) -> bool {
        self.credentials
    }

    async fn geocode(&self, query: &str) -> GeocodeResult<Vec<GeocodeCandidate>> {
        self.calls.lock().await.push(CapturedCall {
            query: query.to_string(),
            at: Instant::now(),
        });

        if !self.credentials {
            return Err(GeocodeError::MissingCredentials);
        }

        let rules = self.rules.lock().await;
        let response = rules
            .iter()
            .find(|(pattern, _)| query.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(MockResponse::Found(self.fallback));

        match response {
            MockResponse::Found(coordinates) => Ok(vec![GeocodeCandidate {
                coordinates,
                formatted_address: Some(query.to_string()),
            }]),
            MockResponse::Failed(error) => Err(error),
        }
    }
}
