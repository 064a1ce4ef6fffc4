//! Ordered resolution strategies
//!
//! Each strategy gets the same inputs and either produces a coordinate or
//! passes. The resolver walks [`CHAIN`] until one succeeds.

use log::{debug, warn};

use super::ShelterResolver;
use crate::cache::CacheEntry;
use crate::models::{GeoCoordinates, ResolutionSource};

/// A coordinate together with the strategy that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub coordinates: GeoCoordinates,
    pub source: ResolutionSource,
}

/// Inputs shared by every strategy for one address
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    pub address: &'a str,
    pub cached: Option<CacheEntry>,
    pub now_epoch_millis: i64,
    pub force_refresh: bool,
}

impl Lookup<'_> {
    /// The cached coordinate, if it may be used as-is
    pub fn usable_entry(&self) -> Option<&CacheEntry> {
        if self.force_refresh {
            return None;
        }
        self.cached
            .as_ref()
            .filter(|entry| entry.is_fresh(self.now_epoch_millis))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Cache,
    Service,
    Heuristic,
    Default,
}

/// Resolution order
pub const CHAIN: [Strategy; 4] = [
    Strategy::Cache,
    Strategy::Service,
    Strategy::Heuristic,
    Strategy::Default,
];

impl Strategy {
    pub async fn attempt(
        self,
        resolver: &ShelterResolver,
        lookup: &Lookup<'_>,
    ) -> Option<Resolution> {
        match self {
            Strategy::Cache => lookup.usable_entry().map(|entry| Resolution {
                coordinates: entry.coordinates,
                source: ResolutionSource::Cache,
            }),
            Strategy::Service => Self::geocode(resolver, lookup.address).await,
            Strategy::Heuristic => resolver
                .heuristics()
                .lookup(lookup.address)
                .map(|neighborhood| {
                    debug!(
                        "Heuristic match {:?} for {:?}",
                        neighborhood.name, lookup.address
                    );
                    Resolution {
                        coordinates: neighborhood.coordinates,
                        source: ResolutionSource::Heuristic,
                    }
                }),
            Strategy::Default => Some(Resolution {
                coordinates: resolver.heuristics().default_coordinates(),
                source: ResolutionSource::Default,
            }),
        }
    }

    async fn geocode(resolver: &ShelterResolver, address: &str) -> Option<Resolution> {
        let geocoder = resolver.geocoder();
        if !geocoder.has_credentials() {
            resolver.note_missing_credentials();
            return None;
        }

        let query = qualified_query(address, resolver.region_suffix());
        resolver.throttle().acquire().await;

        match geocoder.geocode(&query).await {
            Ok(candidates) => candidates.into_iter().next().map(|candidate| {
                debug!("Geocoded {:?} to {}", address, candidate.coordinates);
                Resolution {
                    coordinates: candidate.coordinates,
                    source: ResolutionSource::Service,
                }
            }),
            Err(e) => {
                warn!("Geocoding failed for {:?}, using fallback: {}", address, e);
                None
            }
        }
    }
}

/// Append the regional qualifier, skipping empty parts
pub fn qualified_query(address: &str, region_suffix: &str) -> String {
    [address.trim(), region_suffix.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
