//! HTTP geocoding client (Google Geocoding API wire format)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use super::{GeocodeCandidate, GeocodeResult, Geocoder};
use crate::error::{GeocodeError, Result};
use crate::models::GeoCoordinates;

/// Geocoding API base URL
pub const DEFAULT_API_HOST: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoding API client
pub struct GeocodingClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResultItem>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResultItem {
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodingClient {
    /// Create a new geocoding client.
    ///
    /// `api_host` overrides the service host (used for testing against a local
    /// server). Blank API keys count as missing.
    pub fn new(api_key: Option<String>, api_host: Option<&str>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let base_url = api_host
            .unwrap_or(DEFAULT_API_HOST)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn parse_body(body: GeocodeResponse) -> GeocodeResult<Vec<GeocodeCandidate>> {
        match body.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::ZeroResults),
            other => {
                let status = match body.error_message {
                    Some(msg) => format!("{} ({})", other, msg),
                    None => other.to_string(),
                };
                return Err(GeocodeError::Status(status));
            }
        }

        let candidates: Vec<GeocodeCandidate> = body
            .results
            .into_iter()
            .filter_map(|item| {
                let coordinates =
                    GeoCoordinates::new(item.geometry.location.lat, item.geometry.location.lng);
                if coordinates.is_none() {
                    log::debug!(
                        "Discarding out-of-range candidate {:?}",
                        item.formatted_address
                    );
                }
                coordinates.map(|coordinates| GeocodeCandidate {
                    coordinates,
                    formatted_address: item.formatted_address,
                })
            })
            .collect();

        if candidates.is_empty() {
            return Err(GeocodeError::ZeroResults);
        }
        Ok(candidates)
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn geocode(&self, query: &str) -> GeocodeResult<Vec<GeocodeCandidate>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GeocodeError::MissingCredentials)?;

        let url = format!("{}{}", self.base_url, GEOCODE_PATH);
        let response = self
            .http
            .get(&url)
            .query(&[("address", query), ("key", api_key)])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.json::<GeocodeResponse>().await.map_err(|e| {
                    GeocodeError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Self::parse_body(body)
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(GeocodeError::ServerError(error_msg))
            }
            _ => Err(GeocodeError::Status(format!("HTTP {}", status.as_u16()))),
        }
    }
}
