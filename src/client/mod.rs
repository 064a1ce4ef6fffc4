//! Geocoding service client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GeocodeError;
use crate::models::GeoCoordinates;

pub mod geocoding;
#[cfg(test)]
pub mod mock;
pub mod rate_limit;

pub use geocoding::GeocodingClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockGeocoder;
pub use rate_limit::Throttle;

/// Result type for geocoding calls
pub type GeocodeResult<T> = std::result::Result<T, GeocodeError>;

/// Geocoding service trait
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Whether an API credential is available. Without one, callers must not
    /// attempt a request.
    fn has_credentials(&self) -> bool;

    /// Look up candidates for a fully qualified address query.
    ///
    /// An empty candidate list is reported as [`GeocodeError::ZeroResults`].
    async fn geocode(&self, query: &str) -> GeocodeResult<Vec<GeocodeCandidate>>;
}

/// One geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub coordinates: GeoCoordinates,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}
