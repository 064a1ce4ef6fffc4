//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Local};

/// Format epoch milliseconds as a local date/time.
///
/// Returns "N/A" for out-of-range values.
///
/// # Example output
/// `2025-01-15 07:00`
pub fn format_epoch_millis_local(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// Format the time elapsed between two epoch-millisecond instants.
///
/// # Example output
/// - `3d 4h`
/// - `2h 15m`
/// - `45s`
pub fn format_age(then_millis: i64, now_millis: i64) -> String {
    let secs = now_millis.saturating_sub(then_millis).max(0) / 1000;

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn test_format_epoch_millis_local_valid() {
        // Jan 15, 2025 12:00:00 UTC; local date is the 15th in every zone
        // between UTC-12 and UTC+11
        let result = format_epoch_millis_local(1_736_942_400_000);
        assert!(result.starts_with("2025-01-1"));
    }

    #[test]
    fn test_format_epoch_millis_local_out_of_range() {
        assert_eq!(format_epoch_millis_local(i64::MAX), "N/A");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(0, 3 * 24 * HOUR_MS + 4 * HOUR_MS), "3d 4h");
    }

    #[test]
    fn test_format_age_hours_and_minutes() {
        assert_eq!(format_age(0, 2 * HOUR_MS + 15 * 60_000), "2h 15m");
        assert_eq!(format_age(0, 5 * 60_000), "5m");
    }

    #[test]
    fn test_format_age_clamps_future() {
        assert_eq!(format_age(10_000, 0), "0s");
        assert_eq!(format_age(i64::MAX, i64::MIN), "0s");
    }

    #[test]
    fn test_format_age_saturates_on_overflow() {
        assert!(format_age(i64::MIN, 0).ends_with('h'));
    }
}
