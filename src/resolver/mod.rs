//! Shelter location resolver
//!
//! Turns directory records into map coordinates: fresh cache entries are used
//! as-is, everything else goes through the geocoding service (throttled) and
//! falls back to the neighborhood table, then the city-centre default. Every
//! non-cache result is written back to the cache.

pub mod heuristic;
pub mod strategy;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use indicatif::ProgressBar;
use log::{debug, info, warn};

use crate::cache::{CacheEntry, CoordinateCache, now_millis};
use crate::client::{Geocoder, Throttle};
use crate::directory::{ShelterDirectory, load_shelters};
use crate::error::Result;
use crate::models::{ResolutionSource, ResolvedShelter, ShelterRecord};

pub use heuristic::{HeuristicTable, Neighborhood};
pub use strategy::{CHAIN, Lookup, Resolution, Strategy};

/// Regional qualifier appended to every geocoding query
pub const DEFAULT_REGION_SUFFIX: &str = "Montreal, QC, Canada";

/// Outcome of resolving one address
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressResolution {
    pub resolution: Resolution,
    /// Set when the result could not be written back to the cache
    pub cache_write_failed: bool,
}

/// Result of a batch pass over a directory
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Resolved shelters in directory order
    pub shelters: Vec<ResolvedShelter>,
    /// Directory records skipped for missing required fields
    pub excluded: usize,
    /// Distinct addresses that needed live (or fallback) resolution
    pub live_resolutions: usize,
    /// Cache writes that failed (coordinates were still used)
    pub cache_write_failures: usize,
}

impl ResolutionReport {
    fn count(&self, source: ResolutionSource) -> usize {
        self.shelters.iter().filter(|s| s.source == source).count()
    }

    /// Shelters served from a fresh cache entry
    pub fn cache_hits(&self) -> usize {
        self.count(ResolutionSource::Cache)
    }

    /// Shelters resolved by the geocoding service
    pub fn geocoded(&self) -> usize {
        self.count(ResolutionSource::Service)
    }

    /// Shelters placed by the heuristic table or the default
    pub fn fallbacks(&self) -> usize {
        self.shelters.iter().filter(|s| s.source.is_fallback()).count()
    }
}

/// Resolver over an injected cache and geocoding service
pub struct ShelterResolver {
    cache: Arc<dyn CoordinateCache>,
    geocoder: Arc<dyn Geocoder>,
    throttle: Throttle,
    heuristics: HeuristicTable,
    region_suffix: String,
    progress: ProgressBar,
    credentials_warned: AtomicBool,
}

impl ShelterResolver {
    /// Create a resolver with the default throttle, Montreal heuristics and
    /// region suffix, and no visible progress.
    pub fn new(cache: Arc<dyn CoordinateCache>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            cache,
            geocoder,
            throttle: Throttle::default(),
            heuristics: HeuristicTable::default(),
            region_suffix: DEFAULT_REGION_SUFFIX.to_string(),
            progress: ProgressBar::hidden(),
            credentials_warned: AtomicBool::new(false),
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_heuristics(mut self, heuristics: HeuristicTable) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_region_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.region_suffix = suffix.into();
        self
    }

    /// Report live resolutions on `progress` (length and position are managed
    /// by the resolver).
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub(crate) fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    pub(crate) fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    pub(crate) fn heuristics(&self) -> &HeuristicTable {
        &self.heuristics
    }

    pub(crate) fn region_suffix(&self) -> &str {
        &self.region_suffix
    }

    /// Warn about the missing API key once per resolver.
    pub(crate) fn note_missing_credentials(&self) {
        let already_warned = self.credentials_warned.swap(true, Ordering::SeqCst);
        if !already_warned {
            warn!("No geocoding API key configured; using offline neighborhood lookup");
        }
    }

    /// Resolve a single address.
    ///
    /// The cache is always read, even when `force_refresh` discards the entry.
    pub async fn resolve_address(&self, address: &str, force_refresh: bool) -> AddressResolution {
        let cached = self.cache.get(address).await;
        self.resolve_with(address, cached, force_refresh).await
    }

    async fn resolve_with(
        &self,
        address: &str,
        cached: Option<CacheEntry>,
        force_refresh: bool,
    ) -> AddressResolution {
        let lookup = Lookup {
            address,
            cached,
            now_epoch_millis: now_millis(),
            force_refresh,
        };

        let mut resolution = None;
        for strategy in CHAIN {
            if let Some(found) = strategy.attempt(self, &lookup).await {
                resolution = Some(found);
                break;
            }
        }
        let resolution = resolution.unwrap_or(Resolution {
            coordinates: self.heuristics.default_coordinates(),
            source: ResolutionSource::Default,
        });

        if resolution.source == ResolutionSource::Cache {
            debug!("Cache hit for {:?}", address);
            return AddressResolution {
                resolution,
                cache_write_failed: false,
            };
        }

        let cache_write_failed = match self
            .cache
            .put(address, resolution.coordinates, now_millis())
            .await
        {
            Ok(()) => false,
            Err(e) => {
                warn!("Failed to cache coordinates for {:?}: {}", address, e);
                true
            }
        };

        AddressResolution {
            resolution,
            cache_write_failed,
        }
    }

    /// Resolve every shelter, preserving input order.
    ///
    /// Records sharing an address share one resolution. Fresh cache hits are
    /// looked up concurrently; the rest are resolved one at a time so the
    /// throttle can space out service calls.
    pub async fn resolve_all(
        &self,
        shelters: Vec<ShelterRecord>,
        force_refresh: bool,
    ) -> ResolutionReport {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = shelters
            .iter()
            .map(|s| s.address.as_str())
            .filter(|address| seen.insert(*address))
            .collect();

        let lookups = join_all(
            distinct
                .iter()
                .map(|address| async move { (*address, self.cache.get(address).await) }),
        )
        .await;

        let now = now_millis();
        let mut resolved: HashMap<&str, Resolution> = HashMap::new();
        let mut pending = Vec::new();
        for (address, cached) in lookups {
            match cached {
                Some(entry) if !force_refresh && entry.is_fresh(now) => {
                    resolved.insert(
                        address,
                        Resolution {
                            coordinates: entry.coordinates,
                            source: ResolutionSource::Cache,
                        },
                    );
                }
                _ => pending.push((address, cached)),
            }
        }

        info!(
            "{} distinct addresses: {} cached, {} to resolve",
            distinct.len(),
            resolved.len(),
            pending.len()
        );

        self.progress.set_length(pending.len() as u64);
        self.progress.set_position(0);

        let live_resolutions = pending.len();
        let mut cache_write_failures = 0;
        for (address, cached) in pending {
            self.progress.set_message(address.to_string());
            let outcome = self.resolve_with(address, cached, force_refresh).await;
            if outcome.cache_write_failed {
                cache_write_failures += 1;
            }
            resolved.insert(address, outcome.resolution);
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        let resolved_shelters = shelters
            .iter()
            .map(|shelter| {
                let resolution = resolved
                    .get(shelter.address.as_str())
                    .copied()
                    .unwrap_or(Resolution {
                        coordinates: self.heuristics.default_coordinates(),
                        source: ResolutionSource::Default,
                    });
                ResolvedShelter {
                    shelter: shelter.clone(),
                    coordinates: resolution.coordinates,
                    source: resolution.source,
                }
            })
            .collect();

        ResolutionReport {
            shelters: resolved_shelters,
            excluded: 0,
            live_resolutions,
            cache_write_failures,
        }
    }

    /// Load the directory and resolve it.
    ///
    /// A directory read failure is the only error; everything after it
    /// degrades per address.
    pub async fn resolve_directory(
        &self,
        directory: &dyn ShelterDirectory,
        force_refresh: bool,
    ) -> Result<ResolutionReport> {
        let listing = load_shelters(directory).await?;
        if listing.excluded > 0 {
            info!(
                "Excluded {} directory records missing a name or address",
                listing.excluded
            );
        }

        let mut report = self.resolve_all(listing.shelters, force_refresh).await;
        report.excluded = listing.excluded;
        Ok(report)
    }
}
