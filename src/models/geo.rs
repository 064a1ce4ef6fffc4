//! Geographic coordinate types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    /// Latitude, -90..=90
    pub latitude: f64,

    /// Longitude, -180..=180
    pub longitude: f64,
}

impl GeoCoordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let coords = Self {
            latitude,
            longitude,
        };
        coords.is_valid().then_some(coords)
    }

    /// Build coordinates for a compile-time table entry.
    ///
    /// Callers are responsible for passing in-range values.
    pub const fn fixed(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_range() {
        let coords = GeoCoordinates::new(45.5017, -73.5673).unwrap();
        assert_eq!(coords.latitude, 45.5017);
        assert_eq!(coords.longitude, -73.5673);
    }

    #[test]
    fn test_new_accepts_boundaries() {
        assert!(GeoCoordinates::new(90.0, 180.0).is_some());
        assert!(GeoCoordinates::new(-90.0, -180.0).is_some());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GeoCoordinates::new(90.1, 0.0).is_none());
        assert!(GeoCoordinates::new(0.0, -180.5).is_none());
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(GeoCoordinates::new(f64::NAN, 0.0).is_none());
        assert!(GeoCoordinates::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_display_six_decimals() {
        let coords = GeoCoordinates::fixed(45.5, -73.25);
        assert_eq!(coords.to_string(), "45.500000, -73.250000");
    }
}
