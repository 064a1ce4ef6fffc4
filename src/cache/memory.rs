//! In-process coordinate cache
//!
//! Used for `--no-cache` runs and in tests. Entries disappear with the process,
//! so it only saves service calls within a single session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheEntry, CoordinateCache};
use crate::error::CacheError;
use crate::models::GeoCoordinates;

/// HashMap-backed [`CoordinateCache`]
#[derive(Default)]
pub struct MemoryCoordinateCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    writes: AtomicUsize,
}

impl MemoryCoordinateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls seen so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored addresses
    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CoordinateCache for MemoryCoordinateCache {
    async fn get(&self, address: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(address).copied()
    }

    async fn put(
        &self,
        address: &str,
        coordinates: GeoCoordinates,
        resolved_at_epoch_millis: i64,
    ) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.write().await.insert(
            address.to_string(),
            CacheEntry {
                coordinates,
                resolved_at_epoch_millis,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let cache = MemoryCoordinateCache::new();
        assert!(cache.get("nowhere").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = MemoryCoordinateCache::new();
        cache
            .put("addr", GeoCoordinates::fixed(1.0, 2.0), 10)
            .await
            .unwrap();
        cache
            .put("addr", GeoCoordinates::fixed(3.0, 4.0), 20)
            .await
            .unwrap();

        let entry = cache.get("addr").await.unwrap();
        assert_eq!(entry.coordinates, GeoCoordinates::fixed(3.0, 4.0));
        assert_eq!(entry.resolved_at_epoch_millis, 20);
        assert_eq!(cache.write_count(), 2);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keys_are_case_sensitive() {
        let cache = MemoryCoordinateCache::new();
        cache
            .put("1 Rue Clark", GeoCoordinates::fixed(1.0, 2.0), 10)
            .await
            .unwrap();

        assert!(cache.get("1 rue clark").await.is_none());
    }
}
