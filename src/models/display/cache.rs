//! Coordinate cache display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::cache::CacheEntry;
use crate::output::formatters::{format_age, format_epoch_millis_local};

/// Cache entry row for `cache list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheEntryDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "LATITUDE")]
    pub latitude: f64,

    #[tabled(rename = "LONGITUDE")]
    pub longitude: f64,

    #[tabled(rename = "RESOLVED")]
    pub resolved_at: String,

    #[tabled(rename = "AGE")]
    pub age: String,

    #[tabled(rename = "FRESH")]
    #[serde(skip)]
    pub fresh_marker: String,

    #[tabled(skip)]
    pub fresh: bool,
}

impl CacheEntryDisplay {
    pub fn new(address: &str, entry: &CacheEntry, now_epoch_millis: i64) -> Self {
        let fresh = entry.is_fresh(now_epoch_millis);
        Self {
            address: truncate_string(address, 60),
            latitude: entry.coordinates.latitude,
            longitude: entry.coordinates.longitude,
            resolved_at: format_epoch_millis_local(entry.resolved_at_epoch_millis),
            age: format_age(entry.resolved_at_epoch_millis, now_epoch_millis),
            fresh_marker: if fresh {
                "\u{2713}".to_string() // checkmark
            } else {
                "".to_string()
            },
            fresh,
        }
    }
}
