//! SQLite-backed coordinate cache
//!
//! One row per address. Coordinates are stored as a JSON payload so a damaged
//! row can be detected and skipped without touching its neighbours.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};

use super::{CacheEntry, CoordinateCache};
use crate::error::CacheError;
use crate::models::GeoCoordinates;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

const DB_FILE: &str = "coordinates.db";

type Result<T> = std::result::Result<T, CacheError>;

/// Durable [`CoordinateCache`] stored in a single SQLite file
pub struct SqliteCoordinateCache {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteCoordinateCache {
    /// Open or create the cache at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/sheltermap on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("sheltermap"))
    }

    /// Open the cache inside a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Coordinate cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS coordinates (
                address TEXT PRIMARY KEY NOT NULL,
                payload TEXT NOT NULL,
                resolved_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_resolved_at ON coordinates(resolved_at);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Path of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CacheError::Io("Cache connection lock poisoned".to_string()))
    }

    /// Read and decode one entry. Decoding problems are errors here;
    /// the trait impl turns them into misses.
    pub fn read_entry(&self, address: &str) -> Result<Option<CacheEntry>> {
        let row: Option<(String, i64)> = self
            .lock()?
            .query_row(
                "SELECT payload, resolved_at FROM coordinates WHERE address = ?1",
                params![address],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((payload, resolved_at)) = row else {
            return Ok(None);
        };

        decode_row(&payload, resolved_at).map(Some)
    }

    /// Insert or replace one entry
    pub fn write_entry(
        &self,
        address: &str,
        coordinates: GeoCoordinates,
        resolved_at_epoch_millis: i64,
    ) -> Result<()> {
        let payload = serde_json::to_string(&coordinates)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO coordinates (address, payload, resolved_at)
             VALUES (?1, ?2, ?3)",
            params![address, payload, resolved_at_epoch_millis],
        )?;
        Ok(())
    }

    /// All stored entries ordered by address. Undecodable rows are skipped.
    pub fn entries(&self) -> Result<Vec<(String, CacheEntry)>> {
        let mut entries = Vec::new();
        for (address, decoded) in self.decoded_rows()? {
            match decoded {
                Ok(entry) => entries.push((address, entry)),
                Err(e) => log::warn!("Skipping cache entry for {:?}: {}", address, e),
            }
        }
        Ok(entries)
    }

    fn decoded_rows(&self) -> Result<Vec<(String, Result<CacheEntry>)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT address, payload, resolved_at FROM coordinates ORDER BY address",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut decoded = Vec::new();
        for row in rows {
            let (address, payload, resolved_at) = row?;
            decoded.push((address, decode_row(&payload, resolved_at)));
        }
        Ok(decoded)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM coordinates", [])?;
        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Delete every entry whose address is not in `keep`.
    pub fn retain_addresses(&self, keep: &HashSet<String>) -> Result<ClearStats> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let stored: Vec<String> = {
            let mut stmt = tx.prepare("SELECT address FROM coordinates")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let addresses: std::result::Result<Vec<String>, _> = rows.collect();
            addresses?
        };

        let mut removed = 0;
        for address in stored.iter().filter(|a| !keep.contains(*a)) {
            removed += tx.execute(
                "DELETE FROM coordinates WHERE address = ?1",
                params![address],
            )?;
        }
        tx.commit()?;

        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Get cache statistics relative to `now_epoch_millis`.
    ///
    /// Counts the same rows `entries` returns; undecodable rows are only
    /// reported as corrupt.
    pub fn stats(&self, now_epoch_millis: i64) -> Result<CacheStats> {
        let mut stats = CacheStats::default();

        for (_, decoded) in self.decoded_rows()? {
            let Ok(entry) = decoded else {
                stats.corrupt_entries += 1;
                continue;
            };

            stats.total_entries += 1;
            if entry.is_fresh(now_epoch_millis) {
                stats.fresh_entries += 1;
            } else {
                stats.stale_entries += 1;
            }

            let resolved_at = entry.resolved_at_epoch_millis;
            stats.oldest_entry = stats.oldest_entry.min(Some(resolved_at)).or(Some(resolved_at));
            stats.newest_entry = stats.newest_entry.max(Some(resolved_at));
        }

        Ok(stats)
    }
}

fn decode_row(payload: &str, resolved_at: i64) -> Result<CacheEntry> {
    let coordinates: GeoCoordinates = serde_json::from_str(payload)?;
    if !coordinates.is_valid() {
        return Err(CacheError::Serialization(format!(
            "coordinates out of range: {}",
            payload
        )));
    }

    Ok(CacheEntry {
        coordinates,
        resolved_at_epoch_millis: resolved_at,
    })
}

#[async_trait]
impl CoordinateCache for SqliteCoordinateCache {
    async fn get(&self, address: &str) -> Option<CacheEntry> {
        match self.read_entry(address) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Treating cache entry for {:?} as missing: {}", address, e);
                None
            }
        }
    }

    async fn put(
        &self,
        address: &str,
        coordinates: GeoCoordinates,
        resolved_at_epoch_millis: i64,
    ) -> Result<()> {
        self.write_entry(address, coordinates, resolved_at_epoch_millis)
    }
}

/// Statistics about a clear or prune operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    pub corrupt_entries: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
