//! Durable address → coordinate cache
//!
//! The resolver talks to the cache through [`CoordinateCache`]; the concrete
//! adapter is chosen at the composition root. [`SqliteCoordinateCache`] keeps
//! entries across runs, [`MemoryCoordinateCache`] lives for one process.

pub mod memory;
pub mod storage;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::models::GeoCoordinates;

/// How long a resolved coordinate is trusted without re-resolution
pub const COORDINATE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

/// A cached resolution for one address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub coordinates: GeoCoordinates,
    pub resolved_at_epoch_millis: i64,
}

impl CacheEntry {
    /// An entry is fresh while it is younger than [`COORDINATE_TTL`].
    ///
    /// Timestamps in the future, or far enough in the past to overflow, are
    /// stale so a damaged row gets re-resolved.
    pub fn is_fresh(&self, now_epoch_millis: i64) -> bool {
        now_epoch_millis
            .checked_sub(self.resolved_at_epoch_millis)
            .is_some_and(|age| (0..ttl_millis()).contains(&age))
    }
}

/// Storage seam for coordinate memoization.
///
/// `get` never fails: adapters log storage or decoding problems and report the
/// address as absent. `put` overwrites unconditionally; concurrent writers for
/// the same address resolve last-write-wins.
#[async_trait]
pub trait CoordinateCache: Send + Sync {
    /// Look up the entry for an exact address string.
    async fn get(&self, address: &str) -> Option<CacheEntry>;

    /// Store (or replace) the entry for an address.
    async fn put(
        &self,
        address: &str,
        coordinates: GeoCoordinates,
        resolved_at_epoch_millis: i64,
    ) -> Result<(), CacheError>;
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn ttl_millis() -> i64 {
    COORDINATE_TTL.as_millis() as i64
}

// Re-export main types
pub use memory::MemoryCoordinateCache;
pub use storage::SqliteCoordinateCache;

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn entry_at(resolved_at: i64) -> CacheEntry {
        CacheEntry {
            coordinates: GeoCoordinates::fixed(45.5, -73.5),
            resolved_at_epoch_millis: resolved_at,
        }
    }

    #[test]
    fn test_entry_fresh_within_ttl() {
        let now = 100 * DAY_MS;
        assert!(entry_at(now).is_fresh(now));
        assert!(entry_at(now - 6 * DAY_MS).is_fresh(now));
    }

    #[test]
    fn test_entry_stale_at_exactly_ttl() {
        let now = 100 * DAY_MS;
        assert!(!entry_at(now - 7 * DAY_MS).is_fresh(now));
        assert!(entry_at(now - 7 * DAY_MS + 1).is_fresh(now));
    }

    #[test]
    fn test_entry_stale_after_ttl() {
        let now = 100 * DAY_MS;
        assert!(!entry_at(now - 8 * DAY_MS).is_fresh(now));
    }

    #[test]
    fn test_future_timestamp_is_stale() {
        let now = 100 * DAY_MS;
        assert!(!entry_at(now + 1).is_fresh(now));
        assert!(!entry_at(i64::MAX).is_fresh(now));
    }

    #[test]
    fn test_overflowing_timestamp_is_stale() {
        assert!(!entry_at(i64::MIN).is_fresh(now_millis()));
        assert!(!entry_at(i64::MIN).is_fresh(i64::MAX));
        assert!(!entry_at(i64::MAX).is_fresh(i64::MIN));
    }

    #[test]
    fn test_ttl_is_seven_days() {
        assert_eq!(ttl_millis(), 7 * DAY_MS);
    }
}
