//! Common display utilities and helpers

/// Truncate string to max length (in characters) with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render an optional value, or a dash when absent
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Bed usage as `occupancy/capacity`, `?` for an unknown side
pub fn format_beds(capacity: Option<u32>, occupancy: Option<u32>) -> String {
    match (occupancy, capacity) {
        (None, None) => "-".to_string(),
        (occupancy, capacity) => format!(
            "{}/{}",
            occupancy.map_or("?".to_string(), |o| o.to_string()),
            capacity.map_or("?".to_string(), |c| c.to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("Côte-des-Neiges", 20), "Côte-des-Neiges");
        assert_eq!(truncate_string("Côte-des-Neiges", 7), "Côte...");
    }

    #[test]
    fn test_format_beds() {
        assert_eq!(format_beds(Some(300), Some(280)), "280/300");
        assert_eq!(format_beds(Some(40), None), "?/40");
        assert_eq!(format_beds(None, None), "-");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("514-866-6591")), "514-866-6591");
        assert_eq!(or_dash::<&str>(None), "-");
    }
}
